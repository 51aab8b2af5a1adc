use eframe::egui;
use rust_decimal::Decimal;

/// Dark palette and spacing shared by every view
pub struct DesignSystem;

impl DesignSystem {
    // Backgrounds
    pub const BG_WINDOW: egui::Color32 = egui::Color32::from_rgb(11, 14, 19);
    pub const BG_CARD: egui::Color32 = egui::Color32::from_rgb(22, 27, 34);
    pub const BG_CARD_HOVER: egui::Color32 = egui::Color32::from_rgb(30, 36, 44);
    pub const BG_INPUT: egui::Color32 = egui::Color32::from_rgb(16, 19, 25);

    pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(41, 121, 255);

    // Gains, losses and drawdown
    pub const PROFIT: egui::Color32 = egui::Color32::from_rgb(16, 185, 129);
    pub const LOSS: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
    pub const DRAWDOWN: egui::Color32 = egui::Color32::from_rgb(244, 114, 182);
    pub const WARNING: egui::Color32 = egui::Color32::from_rgb(255, 145, 0);

    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(240, 246, 252);
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_gray(160);
    pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_gray(100);

    pub const BORDER_SUBTLE: egui::Color32 = egui::Color32::from_rgb(48, 54, 61);

    pub const ROUNDING: u8 = 8;
    pub const SPACING_SMALL: f32 = 8.0;
    pub const SPACING_MEDIUM: f32 = 16.0;
    pub const SPACING_LARGE: f32 = 24.0;

    pub fn theme() -> egui::Visuals {
        let mut visuals = egui::Visuals::dark();

        visuals.window_fill = Self::BG_WINDOW;
        visuals.panel_fill = Self::BG_WINDOW;
        visuals.extreme_bg_color = Self::BG_INPUT;

        visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, Self::BORDER_SUBTLE);
        visuals.widgets.inactive.weak_bg_fill = Self::BG_CARD;
        visuals.widgets.inactive.bg_fill = Self::BG_CARD;
        visuals.widgets.hovered.bg_fill = Self::BG_CARD_HOVER;

        visuals.selection.bg_fill = Self::ACCENT.linear_multiply(0.3);
        visuals.selection.stroke = egui::Stroke::new(1.0, Self::ACCENT);

        visuals
    }

    pub fn card_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_CARD)
            .corner_radius(Self::ROUNDING)
            .stroke(egui::Stroke::new(1.0, Self::BORDER_SUBTLE))
            .inner_margin(Self::SPACING_MEDIUM as i8)
    }

    pub fn main_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_WINDOW)
            .inner_margin(egui::Margin::same(Self::SPACING_LARGE as i8))
    }

    pub fn pnl_color(value: Decimal) -> egui::Color32 {
        if value.is_sign_negative() && !value.is_zero() {
            Self::LOSS
        } else {
            Self::PROFIT
        }
    }

    /// Parse a `#RRGGBB` string, falling back to the muted text color
    pub fn hex_color(hex: &str) -> egui::Color32 {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 {
            return Self::TEXT_MUTED;
        }
        match u32::from_str_radix(digits, 16) {
            Ok(rgb) => egui::Color32::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
            Err(_) => Self::TEXT_MUTED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pnl_color() {
        assert_eq!(DesignSystem::pnl_color(dec!(-0.01)), DesignSystem::LOSS);
        assert_eq!(DesignSystem::pnl_color(dec!(0)), DesignSystem::PROFIT);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(
            DesignSystem::hex_color("#FFA500"),
            egui::Color32::from_rgb(255, 165, 0)
        );
        assert_eq!(DesignSystem::hex_color("nope"), DesignSystem::TEXT_MUTED);
    }
}
