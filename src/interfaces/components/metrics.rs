use crate::interfaces::components::card::Card;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Headline number with an optional secondary line (e.g. the KRW figure)
pub fn render_metric_card(
    ui: &mut egui::Ui,
    title: &str,
    value: &str,
    value_color: egui::Color32,
    context: Option<&str>,
) {
    Card::new().title(title).show(ui, |ui| {
        ui.label(
            egui::RichText::new(value)
                .size(22.0)
                .strong()
                .color(value_color),
        );
        if let Some(ctx) = context {
            ui.label(
                egui::RichText::new(ctx)
                    .size(11.0)
                    .color(DesignSystem::TEXT_MUTED),
            );
        }
    });
}

/// Small rounded label used in the header bar
pub fn render_status_pill(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    egui::Frame::NONE
        .fill(color.linear_multiply(0.15))
        .corner_radius(12)
        .inner_margin(egui::Margin::symmetric(8, 4))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).size(12.0).strong().color(color));
        });
}
