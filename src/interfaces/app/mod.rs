//! Desktop front end.
//!
//! Owns the journal and the form buffers; views live in the child modules and
//! call back into the `submit_*` helpers below.
mod analytics_view;
mod journal_view;
mod me_view;

use crate::application::indicators::SharedIndicators;
use crate::application::journal::Journal;
use crate::application::navigation::{Tab, guard, landing_tab};
use crate::application::report::JournalReport;
use crate::domain::errors::JournalError;
use crate::domain::exchange::{HANDSHAKE_DELAY, LinkRequest};
use crate::domain::market::MarketIndicators;
use crate::domain::ports::KeyValueStore;
use crate::infrastructure::export::{
    Workbook, default_csv_dir_name, default_file_name, write_csv_dir, write_xlsx,
};
use crate::interfaces::components::metrics::render_status_pill;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::format::format_amount;
use crate::interfaces::forms::{
    EntryForm, LinkForm, LinkStatus, LoginForm, SettingsForm, SignupForm,
};
use chrono::{Local, NaiveDate};
use crossbeam_channel::Receiver;
use eframe::egui;
use std::fmt::Display;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

const MAX_LOG_LINES: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Login,
    Signup,
}

struct PendingLink {
    request: LinkRequest,
    ready_at: Instant,
}

pub struct JournalApp<S: KeyValueStore> {
    journal: Journal<S>,
    indicators: SharedIndicators,
    /// Last snapshot read from `indicators`
    market: MarketIndicators,
    log_rx: Receiver<String>,
    logs: Vec<String>,
    tab: Tab,
    highlight_auth: bool,
    auth_mode: AuthMode,
    entry_form: EntryForm,
    settings_form: SettingsForm,
    login_form: LoginForm,
    signup_form: SignupForm,
    link_form: LinkForm,
    pending_link: Option<PendingLink>,
    alert: Option<String>,
    export_dir: PathBuf,
}

impl<S: KeyValueStore> JournalApp<S> {
    pub fn new(
        journal: Journal<S>,
        indicators: SharedIndicators,
        log_rx: Receiver<String>,
        export_dir: PathBuf,
    ) -> Self {
        let tab = landing_tab(journal.session());
        let settings_form = SettingsForm::from_settings(journal.settings());
        Self {
            journal,
            indicators,
            market: MarketIndicators::default(),
            log_rx,
            logs: Vec::new(),
            tab,
            highlight_auth: false,
            auth_mode: AuthMode::Login,
            entry_form: EntryForm::new(today()),
            settings_form,
            login_form: LoginForm::default(),
            signup_form: SignupForm::default(),
            link_form: LinkForm::default(),
            pending_link: None,
            alert: None,
            export_dir,
        }
    }

    fn report(&self) -> JournalReport {
        self.journal.report(self.market.krw_per_usdt)
    }

    fn navigate(&mut self, requested: Tab) {
        let route = guard(self.journal.session(), requested);
        self.tab = route.tab;
        self.highlight_auth = route.prompt_login;
    }

    fn show_error(&mut self, e: impl Display) {
        self.alert = Some(e.to_string());
    }

    fn drain_logs(&mut self) {
        while let Ok(line) = self.log_rx.try_recv() {
            self.logs.push(line.trim_end().to_string());
        }
        if self.logs.len() > MAX_LOG_LINES {
            let excess = self.logs.len() - MAX_LOG_LINES;
            self.logs.drain(..excess);
        }
    }

    fn sync_indicators(&mut self) {
        // Never block the frame on the poller
        if let Ok(latest) = self.indicators.try_read() {
            self.market = latest.clone();
        }
    }

    fn submit_entry(&mut self) {
        match self.journal.add_entry(self.entry_form.draft()) {
            Ok(_) => self.entry_form.reset(today()),
            Err(e) => self.show_error(e),
        }
    }

    fn delete_entry(&mut self, id: &str) {
        if let Err(e) = self.journal.remove_entry(id) {
            self.show_error(e);
        }
    }

    fn save_settings(&mut self) {
        let form = self.settings_form.clone();
        match self
            .journal
            .save_settings(&form.currency, &form.initial_equity)
        {
            Ok(settings) => self.settings_form = SettingsForm::from_settings(&settings),
            Err(e) => self.show_error(e),
        }
    }

    fn submit_login(&mut self) {
        let form = self.login_form.clone();
        match self.journal.login(&form.username, &form.password) {
            Ok(_) => {
                self.login_form.clear_password();
                self.after_session_change();
            }
            Err(e) => self.show_error(e),
        }
    }

    fn submit_signup(&mut self) {
        let form = self.signup_form.clone();
        match self
            .journal
            .signup(&form.username, &form.password, &form.confirm)
        {
            Ok(_) => {
                self.signup_form.clear();
                self.after_session_change();
            }
            Err(e) => self.show_error(e),
        }
    }

    fn logout(&mut self) {
        match self.journal.logout() {
            Ok(()) => self.after_session_change(),
            Err(e) => self.show_error(e),
        }
    }

    fn after_session_change(&mut self) {
        self.highlight_auth = false;
        self.tab = landing_tab(self.journal.session());
    }

    fn start_link(&mut self) {
        if self.pending_link.is_some() {
            return;
        }
        let Some(request) = self.link_form.request() else {
            return;
        };
        if let Err(e) = request.validate() {
            self.link_form.finish(LinkStatus::Failed(e.to_string()));
            return;
        }

        info!("Linking {}...", request.exchange);
        self.link_form.status = Some(LinkStatus::Pending);
        self.pending_link = Some(PendingLink {
            request,
            ready_at: Instant::now() + HANDSHAKE_DELAY,
        });
    }

    /// Complete the simulated handshake once its delay has passed
    fn poll_link(&mut self) {
        let due = matches!(&self.pending_link, Some(p) if Instant::now() >= p.ready_at);
        if !due {
            return;
        }
        let Some(pending) = self.pending_link.take() else {
            return;
        };

        let outcome = pending
            .request
            .handshake()
            .map_err(JournalError::from)
            .and_then(|()| self.journal.record_link(&pending.request.exchange));
        match outcome {
            Ok(_) => self.link_form.finish(LinkStatus::Linked),
            Err(e) => {
                warn!("{}", e);
                self.link_form.finish(LinkStatus::Failed(e.to_string()));
            }
        }
    }

    fn export_xlsx(&mut self) {
        let workbook = Workbook::from_report(&self.report());
        let path = self.export_dir.join(default_file_name(today()));
        match write_xlsx(&workbook, &path) {
            Ok(()) => self.alert = Some(format!("Exported to {}", path.display())),
            Err(e) => {
                error!("Export failed: {:#}", e);
                self.alert = Some(format!("Export failed: {}", e));
            }
        }
    }

    fn export_csv(&mut self) {
        let workbook = Workbook::from_report(&self.report());
        let dir = self.export_dir.join(default_csv_dir_name(today()));
        match write_csv_dir(&workbook, &dir) {
            Ok(files) => {
                self.alert = Some(format!("Wrote {} files to {}", files.len(), dir.display()))
            }
            Err(e) => {
                error!("CSV export failed: {:#}", e);
                self.alert = Some(format!("Export failed: {}", e));
            }
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new("CoinPNL")
                        .strong()
                        .color(DesignSystem::TEXT_PRIMARY),
                );
                ui.separator();

                for tab in Tab::ALL {
                    if ui.selectable_label(self.tab == tab, tab.to_string()).clicked() {
                        self.navigate(tab);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(session) = self.journal.session() {
                        ui.label(
                            egui::RichText::new(format!("👤 {}", session.name))
                                .color(DesignSystem::TEXT_SECONDARY),
                        );
                        ui.separator();
                    }

                    match (&self.market.fear_greed, self.market.fear_greed_label()) {
                        (Some(reading), Some(label)) => render_status_pill(
                            ui,
                            &format!("F&G {}", label),
                            DesignSystem::hex_color(reading.classification.color_hex()),
                        ),
                        _ => render_status_pill(ui, "F&G --", DesignSystem::TEXT_MUTED),
                    }

                    let dominance = self
                        .market
                        .dominance_label()
                        .unwrap_or_else(|| "--".to_string());
                    render_status_pill(
                        ui,
                        &format!("BTC.D {}", dominance),
                        DesignSystem::WARNING,
                    );

                    let rate = self
                        .market
                        .krw_per_usdt
                        .map(|r| format_amount(r, None))
                        .unwrap_or_else(|| "--".to_string());
                    render_status_pill(ui, &format!("USDT/KRW {}", rate), DesignSystem::ACCENT);
                });
            });
            ui.add_space(4.0);
        });
    }

    fn render_log_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("log_panel")
            .default_width(300.0)
            .min_width(200.0)
            .max_width(500.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Logs");
                ui.separator();
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.logs {
                            let color = if line.contains("ERROR") {
                                DesignSystem::LOSS
                            } else if line.contains("WARN") {
                                DesignSystem::WARNING
                            } else {
                                DesignSystem::TEXT_SECONDARY
                            };
                            ui.label(egui::RichText::new(line).size(11.0).monospace().color(color));
                        }
                    });
            });
    }

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };
        let mut close = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(DesignSystem::SPACING_SMALL);
                if ui.button("OK").clicked() {
                    close = true;
                }
            });
        if close {
            self.alert = None;
        }
    }
}

impl<S: KeyValueStore> eframe::App for JournalApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_logs();
        self.sync_indicators();
        self.poll_link();

        // Logging out elsewhere must not leave a guarded tab open
        if self.journal.session().is_none() && self.tab != Tab::Me {
            self.navigate(self.tab);
        }

        self.render_header(ctx);
        self.render_log_panel(ctx);

        egui::CentralPanel::default()
            .frame(DesignSystem::main_frame())
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("main_scroll")
                    .show(ui, |ui| match self.tab {
                        Tab::Journal => self.render_journal(ui),
                        Tab::Analytics => self.render_analytics(ui),
                        Tab::Me => self.render_me(ui),
                    });
            });

        self.render_alert(ctx);

        let repaint = if self.pending_link.is_some() {
            Duration::from_millis(50)
        } else {
            Duration::from_secs(1)
        };
        ctx.request_repaint_after(repaint);
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
