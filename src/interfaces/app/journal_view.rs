use super::{JournalApp, today};
use crate::application::report::JournalReport;
use crate::domain::journal::{DEFAULT_TICKERS, Side};
use crate::domain::ports::KeyValueStore;
use crate::interfaces::components::card::Card;
use crate::interfaces::components::metrics::render_metric_card;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::format::{
    format_amount, format_percent, format_signed, net_equity_line, summary_line,
};
use eframe::egui;

impl<S: KeyValueStore> JournalApp<S> {
    pub(super) fn render_journal(&mut self, ui: &mut egui::Ui) {
        let report = self.report();
        let summary = &report.analysis.summary;
        let ccy = report.settings.ccy.clone();

        ui.columns(3, |cols| {
            let krw_net = report
                .to_krw(summary.net_equity)
                .map(|k| format!("≈ {}", format_amount(k, Some("KRW"))));
            render_metric_card(
                &mut cols[0],
                "Net equity",
                &format_amount(summary.net_equity, Some(&ccy)),
                DesignSystem::TEXT_PRIMARY,
                krw_net.as_deref(),
            );

            let krw_total = report
                .to_krw(summary.total_pnl)
                .map(|k| format!("≈ {}", format_amount(k, Some("KRW"))));
            render_metric_card(
                &mut cols[1],
                "Total PnL",
                &format_amount(summary.total_pnl, Some(&ccy)),
                DesignSystem::pnl_color(summary.total_pnl),
                krw_total.as_deref(),
            );

            render_metric_card(
                &mut cols[2],
                "Return / MDD",
                &format!(
                    "{} / {}",
                    format_percent(summary.return_ratio),
                    format_percent(summary.max_drawdown)
                ),
                DesignSystem::pnl_color(summary.return_ratio),
                Some(&format!("{} trades over {} days", summary.trade_count, summary.trading_days)),
            );
        });

        ui.add_space(DesignSystem::SPACING_SMALL);
        ui.label(
            egui::RichText::new(format!("{}  ·  {}", summary_line(&report), net_equity_line(&report)))
                .color(DesignSystem::TEXT_SECONDARY),
        );
        ui.add_space(DesignSystem::SPACING_MEDIUM);

        self.render_settings_card(ui);
        ui.add_space(DesignSystem::SPACING_MEDIUM);
        self.render_entry_form(ui);
        ui.add_space(DesignSystem::SPACING_MEDIUM);
        self.render_entry_table(ui, &report);
    }

    fn render_settings_card(&mut self, ui: &mut egui::Ui) {
        Card::new().title("Settings").show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Currency");
                ui.add(
                    egui::TextEdit::singleline(&mut self.settings_form.currency)
                        .hint_text("USDT")
                        .desired_width(80.0),
                );
                ui.label("Initial equity");
                ui.add(
                    egui::TextEdit::singleline(&mut self.settings_form.initial_equity)
                        .hint_text("10000")
                        .desired_width(120.0),
                );
                if ui.button("Save").clicked() {
                    self.save_settings();
                }
            });
        });
    }

    fn render_entry_form(&mut self, ui: &mut egui::Ui) {
        Card::new().title("New entry").show(ui, |ui| {
            egui::Grid::new("entry_form_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Date");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.entry_form.date)
                            .hint_text("YYYY-MM-DD")
                            .desired_width(120.0),
                    );
                    ui.end_row();

                    ui.label("Ticker");
                    ui.horizontal(|ui| {
                        let mut preset = self.entry_form.preset.clone();
                        let selected = if preset.is_empty() {
                            "Custom".to_string()
                        } else {
                            preset.clone()
                        };
                        egui::ComboBox::from_id_salt("ticker_preset")
                            .selected_text(selected)
                            .show_ui(ui, |ui| {
                                ui.selectable_value(&mut preset, String::new(), "Custom");
                                for ticker in DEFAULT_TICKERS {
                                    ui.selectable_value(&mut preset, ticker.to_string(), *ticker);
                                }
                            });
                        if preset != self.entry_form.preset {
                            self.entry_form.pick_preset(&preset);
                        }
                        ui.add(
                            egui::TextEdit::singleline(&mut self.entry_form.symbol)
                                .hint_text("BTC/USDT")
                                .desired_width(120.0),
                        );
                    });
                    ui.end_row();

                    ui.label("Side");
                    ui.horizontal(|ui| {
                        ui.selectable_value(&mut self.entry_form.side, Side::Long, "LONG");
                        ui.selectable_value(&mut self.entry_form.side, Side::Short, "SHORT");
                    });
                    ui.end_row();

                    ui.label("PnL");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.entry_form.pnl)
                            .hint_text("25.5 or -12")
                            .desired_width(120.0),
                    );
                    ui.end_row();

                    ui.label("Reason");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.entry_form.reason)
                            .hint_text("Setup, mistake, lesson")
                            .desired_width(320.0),
                    );
                    ui.end_row();
                });

            ui.add_space(DesignSystem::SPACING_SMALL);
            ui.horizontal(|ui| {
                if ui.button("Add entry").clicked() {
                    self.submit_entry();
                }
                if ui.button("Clear").clicked() {
                    self.entry_form.reset(today());
                }
            });
        });
    }

    fn render_entry_table(&mut self, ui: &mut egui::Ui, report: &JournalReport) {
        let mut to_delete: Option<String> = None;
        let show_krw = report.krw_per_usdt.is_some();

        Card::new()
            .title(format!("Entries ({})", report.entries.len()))
            .show(ui, |ui| {
                if report.entries.is_empty() {
                    ui.label(
                        egui::RichText::new("No entries yet.")
                            .italics()
                            .color(DesignSystem::TEXT_MUTED),
                    );
                    return;
                }

                egui::Grid::new("entries_grid")
                    .striped(true)
                    .spacing([20.0, 6.0])
                    .show(ui, |ui| {
                        ui.strong("Date");
                        ui.strong("Symbol");
                        ui.strong("Side");
                        ui.strong("PnL");
                        if show_krw {
                            ui.strong("KRW");
                        }
                        ui.strong("Reason");
                        ui.label("");
                        ui.end_row();

                        for entry in report.table_rows() {
                            ui.label(if entry.has_date() { entry.date.as_str() } else { "-" });
                            ui.label(&entry.symbol);
                            let side_color = match entry.side {
                                Side::Long => DesignSystem::PROFIT,
                                Side::Short => DesignSystem::LOSS,
                            };
                            ui.colored_label(side_color, entry.side.to_string());
                            ui.colored_label(
                                DesignSystem::pnl_color(entry.pnl),
                                format_signed(entry.pnl),
                            );
                            if show_krw {
                                let krw = report
                                    .to_krw(entry.pnl)
                                    .map(|k| format_amount(k, None))
                                    .unwrap_or_default();
                                ui.label(egui::RichText::new(krw).color(DesignSystem::TEXT_MUTED));
                            }
                            ui.label(&entry.reason);
                            if ui.small_button("Delete").clicked() {
                                to_delete = Some(entry.id.clone());
                            }
                            ui.end_row();
                        }
                    });
            });

        if let Some(id) = to_delete {
            self.delete_entry(&id);
        }
    }
}
