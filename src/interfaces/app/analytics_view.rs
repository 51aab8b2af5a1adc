use super::JournalApp;
use crate::domain::performance::to_percent;
use crate::domain::ports::KeyValueStore;
use crate::interfaces::components::card::Card;
use crate::interfaces::components::metrics::render_metric_card;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::format::{format_amount, format_percent};
use eframe::egui;
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::ops::RangeInclusive;

const PLOT_HEIGHT: f32 = 220.0;

impl<S: KeyValueStore> JournalApp<S> {
    pub(super) fn render_analytics(&mut self, ui: &mut egui::Ui) {
        let report = self.report();
        let analysis = &report.analysis;
        let summary = &analysis.summary;

        ui.heading(
            egui::RichText::new("Analytics")
                .size(22.0)
                .strong()
                .color(DesignSystem::TEXT_PRIMARY),
        );
        ui.add_space(DesignSystem::SPACING_MEDIUM);

        ui.columns(4, |cols| {
            render_metric_card(
                &mut cols[0],
                "Total PnL",
                &format_amount(summary.total_pnl, Some(&report.settings.ccy)),
                DesignSystem::pnl_color(summary.total_pnl),
                None,
            );
            render_metric_card(
                &mut cols[1],
                "Return",
                &format_percent(summary.return_ratio),
                DesignSystem::pnl_color(summary.return_ratio),
                None,
            );
            render_metric_card(
                &mut cols[2],
                "Max drawdown",
                &format_percent(summary.max_drawdown),
                DesignSystem::DRAWDOWN,
                None,
            );
            render_metric_card(
                &mut cols[3],
                "Trading days",
                &summary.trading_days.to_string(),
                DesignSystem::TEXT_PRIMARY,
                Some(&format!("{} entries", summary.trade_count)),
            );
        });
        ui.add_space(DesignSystem::SPACING_MEDIUM);

        if analysis.daily.is_empty() {
            ui.label(
                egui::RichText::new("Add dated entries to see the equity curve.")
                    .italics()
                    .color(DesignSystem::TEXT_MUTED),
            );
            return;
        }

        let labels: Vec<String> = analysis.daily.iter().map(|d| d.date.clone()).collect();

        let equity_points: Vec<[f64; 2]> = analysis
            .series
            .equity
            .iter()
            .enumerate()
            .map(|(i, p)| [i as f64, as_f64(p.equity)])
            .collect();
        Card::new().title("Equity curve").show(ui, |ui| {
            Plot::new("equity_plot")
                .height(PLOT_HEIGHT)
                .x_axis_formatter(date_axis(labels.clone()))
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new("Equity", PlotPoints::from(equity_points))
                            .color(DesignSystem::ACCENT)
                            .width(2.0),
                    );
                });
        });
        ui.add_space(DesignSystem::SPACING_MEDIUM);

        let pnl_bars: Vec<Bar> = analysis
            .daily
            .iter()
            .enumerate()
            .map(|(i, d)| Bar::new(i as f64, as_f64(d.pnl)).fill(DesignSystem::pnl_color(d.pnl)))
            .collect();
        Card::new().title("Daily PnL").show(ui, |ui| {
            Plot::new("daily_pnl_plot")
                .height(PLOT_HEIGHT)
                .x_axis_formatter(date_axis(labels.clone()))
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new("Daily PnL", pnl_bars).width(0.6));
                });
        });
        ui.add_space(DesignSystem::SPACING_MEDIUM);

        let drawdown_bars: Vec<Bar> = analysis
            .series
            .drawdown
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Bar::new(i as f64, as_f64(to_percent(p.drawdown))).fill(DesignSystem::DRAWDOWN)
            })
            .collect();
        Card::new().title("Drawdown (%)").show(ui, |ui| {
            Plot::new("drawdown_plot")
                .height(PLOT_HEIGHT)
                .x_axis_formatter(date_axis(labels))
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new("Drawdown", drawdown_bars).width(0.6));
                });
        });
        ui.add_space(DesignSystem::SPACING_MEDIUM);

        ui.horizontal(|ui| {
            if ui.button("Export .xlsx").clicked() {
                self.export_xlsx();
            }
            if ui.button("Export CSV").clicked() {
                self.export_csv();
            }
        });
    }
}

fn as_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Day index on the x axis back to its date; fractional marks stay blank.
fn date_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let idx = mark.value.round();
        if idx < 0.0 || (mark.value - idx).abs() > 1e-9 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}
