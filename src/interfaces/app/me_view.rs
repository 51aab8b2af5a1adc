use super::{AuthMode, JournalApp};
use crate::domain::auth::Session;
use crate::domain::exchange::SUPPORTED_EXCHANGES;
use crate::domain::ports::KeyValueStore;
use crate::interfaces::components::card::Card;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::format::summary_line;
use crate::interfaces::forms::LinkStatus;
use eframe::egui;

impl<S: KeyValueStore> JournalApp<S> {
    pub(super) fn render_me(&mut self, ui: &mut egui::Ui) {
        ui.heading(
            egui::RichText::new("Account")
                .size(22.0)
                .strong()
                .color(DesignSystem::TEXT_PRIMARY),
        );
        ui.add_space(DesignSystem::SPACING_MEDIUM);

        match self.journal.session().cloned() {
            None => self.render_auth_card(ui),
            Some(session) => {
                self.render_profile_card(ui, &session);
                ui.add_space(DesignSystem::SPACING_MEDIUM);
                self.render_link_card(ui);
                ui.add_space(DesignSystem::SPACING_MEDIUM);
                self.render_export_card(ui);
            }
        }
    }

    fn render_auth_card(&mut self, ui: &mut egui::Ui) {
        Card::new()
            .title("Log in or sign up")
            .highlight(self.highlight_auth)
            .show(ui, |ui| {
                if self.highlight_auth {
                    ui.colored_label(DesignSystem::WARNING, "Log in to open the journal.");
                    ui.add_space(DesignSystem::SPACING_SMALL);
                }

                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.auth_mode, AuthMode::Login, "Log in");
                    ui.selectable_value(&mut self.auth_mode, AuthMode::Signup, "Sign up");
                });
                ui.add_space(DesignSystem::SPACING_SMALL);

                match self.auth_mode {
                    AuthMode::Login => {
                        egui::Grid::new("login_grid")
                            .num_columns(2)
                            .spacing([12.0, 8.0])
                            .show(ui, |ui| {
                                ui.label("Username");
                                ui.text_edit_singleline(&mut self.login_form.username);
                                ui.end_row();
                                ui.label("Password");
                                ui.add(
                                    egui::TextEdit::singleline(&mut self.login_form.password)
                                        .password(true),
                                );
                                ui.end_row();
                            });
                        if ui.button("Log in").clicked() {
                            self.submit_login();
                        }
                    }
                    AuthMode::Signup => {
                        egui::Grid::new("signup_grid")
                            .num_columns(2)
                            .spacing([12.0, 8.0])
                            .show(ui, |ui| {
                                ui.label("Username");
                                ui.text_edit_singleline(&mut self.signup_form.username);
                                ui.end_row();
                                ui.label("Password");
                                ui.add(
                                    egui::TextEdit::singleline(&mut self.signup_form.password)
                                        .password(true)
                                        .hint_text("8+ characters"),
                                );
                                ui.end_row();
                                ui.label("Confirm");
                                ui.add(
                                    egui::TextEdit::singleline(&mut self.signup_form.confirm)
                                        .password(true),
                                );
                                ui.end_row();
                            });
                        if ui.button("Sign up").clicked() {
                            self.submit_signup();
                        }
                    }
                }
            });
    }

    fn render_profile_card(&mut self, ui: &mut egui::Ui, session: &Session) {
        Card::new().title("Signed in").show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&session.name).strong().size(16.0));
                ui.label(egui::RichText::new(&session.email).color(DesignSystem::TEXT_MUTED));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Log out").clicked() {
                        self.logout();
                    }
                });
            });
        });
    }

    fn render_link_card(&mut self, ui: &mut egui::Ui) {
        let pending = self.link_form.is_pending();

        Card::new().title("Exchange link (demo)").show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for exchange in SUPPORTED_EXCHANGES {
                    let linked = self.journal.state().is_linked(exchange);
                    let text = if linked {
                        egui::RichText::new(format!("✔ {}", exchange)).color(DesignSystem::PROFIT)
                    } else {
                        egui::RichText::new(*exchange)
                    };
                    let selected = self.link_form.exchange.as_deref() == Some(*exchange);
                    if ui
                        .add_enabled(!pending, egui::Button::new(text).selected(selected))
                        .clicked()
                    {
                        self.link_form.open(exchange);
                    }
                }
            });

            let Some(exchange) = self.link_form.exchange.clone() else {
                return;
            };
            ui.add_space(DesignSystem::SPACING_SMALL);

            egui::Grid::new("link_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("API key");
                    ui.add(egui::TextEdit::singleline(&mut self.link_form.api_key).password(true));
                    ui.end_row();
                    ui.label("API secret");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.link_form.api_secret).password(true),
                    );
                    ui.end_row();
                    ui.label("Passphrase");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.link_form.passphrase)
                            .password(true)
                            .hint_text("optional"),
                    );
                    ui.end_row();
                });

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!pending, egui::Button::new(format!("Link {}", exchange)))
                    .clicked()
                {
                    self.start_link();
                }
                match &self.link_form.status {
                    Some(LinkStatus::Pending) => {
                        ui.spinner();
                        ui.label("Connecting...");
                    }
                    Some(LinkStatus::Linked) => {
                        ui.colored_label(DesignSystem::PROFIT, format!("{} linked", exchange));
                    }
                    Some(LinkStatus::Failed(reason)) => {
                        ui.colored_label(DesignSystem::LOSS, reason);
                    }
                    None => {}
                }
            });
            ui.label(
                egui::RichText::new("Keys are used for this check only and never saved.")
                    .size(11.0)
                    .color(DesignSystem::TEXT_MUTED),
            );
        });
    }

    fn render_export_card(&mut self, ui: &mut egui::Ui) {
        let summary = summary_line(&self.report());
        Card::new().title("Export").show(ui, |ui| {
            ui.label(egui::RichText::new(summary).color(DesignSystem::TEXT_SECONDARY));
            ui.add_space(DesignSystem::SPACING_SMALL);
            ui.horizontal(|ui| {
                if ui.button("Export .xlsx").clicked() {
                    self.export_xlsx();
                }
                if ui.button("Export CSV").clicked() {
                    self.export_csv();
                }
            });
        });
    }
}
