//! Text buffers behind the desktop forms.
//!
//! Kept free of egui so submit/reset behaviour can be tested headless.
use crate::domain::exchange::LinkRequest;
use crate::domain::journal::{EntryDraft, Side};
use crate::domain::settings::Settings;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct EntryForm {
    pub date: String,
    pub preset: String,
    pub symbol: String,
    pub side: Side,
    pub pnl: String,
    pub reason: String,
}

impl EntryForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            preset: String::new(),
            symbol: String::new(),
            side: Side::Long,
            pnl: String::new(),
            reason: String::new(),
        }
    }

    /// Picking a preset fills the symbol box
    pub fn pick_preset(&mut self, preset: &str) {
        self.preset = preset.to_string();
        if !preset.is_empty() {
            self.symbol = preset.to_string();
        }
    }

    pub fn draft(&self) -> EntryDraft {
        EntryDraft {
            date: self.date.clone(),
            preset: self.preset.clone(),
            symbol: self.symbol.clone(),
            side: self.side,
            pnl: self.pnl.clone(),
            reason: self.reason.clone(),
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsForm {
    pub currency: String,
    pub initial_equity: String,
}

impl SettingsForm {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency: settings.ccy.clone(),
            initial_equity: settings.initial_equity.normalize().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn clear_password(&mut self) {
        self.password.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub confirm: String,
}

impl SignupForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Link panel for one exchange. Opening it for another exchange wipes the
/// typed keys and the status line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkForm {
    pub exchange: Option<String>,
    pub api_key: String,
    pub api_secret: String,
    pub passphrase: String,
    pub status: Option<LinkStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkStatus {
    Pending,
    Linked,
    Failed(String),
}

impl LinkForm {
    pub fn open(&mut self, exchange: &str) {
        *self = Self {
            exchange: Some(exchange.to_string()),
            ..Self::default()
        };
    }

    pub fn request(&self) -> Option<LinkRequest> {
        self.exchange
            .as_deref()
            .map(|ex| LinkRequest::new(ex, &self.api_key, &self.api_secret, &self.passphrase))
    }

    /// Drop the keys once the handshake is over, whatever the outcome
    pub fn finish(&mut self, status: LinkStatus) {
        self.api_key.clear();
        self.api_secret.clear();
        self.passphrase.clear();
        self.status = Some(status);
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, Some(LinkStatus::Pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn test_entry_form_preset_and_reset() {
        let mut form = EntryForm::new(day());
        assert_eq!(form.date, "2024-05-17");

        form.pick_preset("ETH/USDT");
        form.pnl = "12.5".to_string();
        form.side = Side::Short;
        assert_eq!(form.symbol, "ETH/USDT");

        let entry = form.draft().into_entry().unwrap();
        assert_eq!(entry.symbol, "ETH/USDT");
        assert_eq!(entry.pnl, dec!(12.5));
        assert_eq!(entry.side, Side::Short);

        form.reset(NaiveDate::from_ymd_opt(2024, 5, 18).unwrap());
        assert_eq!(form, EntryForm::new(NaiveDate::from_ymd_opt(2024, 5, 18).unwrap()));
    }

    #[test]
    fn test_settings_form_prefills() {
        let settings = Settings::default().with_update("krw", "1500000.00");
        let form = SettingsForm::from_settings(&settings);
        assert_eq!(form.currency, "KRW");
        assert_eq!(form.initial_equity, "1500000");
    }

    #[test]
    fn test_link_form_wipes_keys() {
        let mut form = LinkForm::default();
        assert!(form.request().is_none());

        form.open("Bybit");
        form.api_key = " key-12345 ".to_string();
        form.api_secret = "secret-123".to_string();
        let request = form.request().unwrap();
        assert_eq!(request.exchange, "Bybit");
        assert_eq!(request.api_key, "key-12345");

        form.status = Some(LinkStatus::Pending);
        assert!(form.is_pending());
        form.finish(LinkStatus::Linked);
        assert!(form.api_key.is_empty() && form.api_secret.is_empty());
        assert_eq!(form.status, Some(LinkStatus::Linked));

        form.open("OKX");
        assert_eq!(form.exchange.as_deref(), Some("OKX"));
        assert_eq!(form.status, None);
    }
}
