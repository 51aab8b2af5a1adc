use crate::domain::numeric;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Currency that unlocks the KRW conversion hints
pub const USDT: &str = "USDT";

/// Journal-wide settings, changed only through an explicit save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_currency")]
    pub ccy: String,
    #[serde(with = "numeric::lenient", default)]
    pub initial_equity: Decimal,
}

fn default_currency() -> String {
    USDT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ccy: default_currency(),
            initial_equity: dec!(10000),
        }
    }
}

impl Settings {
    /// Apply a settings form: a blank currency keeps the current one, the
    /// initial equity is coerced (blank or invalid means zero).
    pub fn with_update(&self, currency: &str, initial_equity: &str) -> Self {
        let currency = currency.trim();
        Self {
            ccy: if currency.is_empty() {
                self.ccy.clone()
            } else {
                currency.to_uppercase()
            },
            initial_equity: numeric::coerce_decimal(initial_equity),
        }
    }

    pub fn is_usdt(&self) -> bool {
        self.ccy == USDT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.ccy, "USDT");
        assert_eq!(settings.initial_equity, dec!(10000));
        assert!(settings.is_usdt());
    }

    #[test]
    fn test_update_keeps_currency_when_blank() {
        let updated = Settings::default().with_update("  ", "2500");
        assert_eq!(updated.ccy, "USDT");
        assert_eq!(updated.initial_equity, dec!(2500));
    }

    #[test]
    fn test_update_coerces_invalid_equity() {
        let updated = Settings::default().with_update("krw", "ten thousand");
        assert_eq!(updated.ccy, "KRW");
        assert_eq!(updated.initial_equity, Decimal::ZERO);
        assert!(!updated.is_usdt());
    }

    #[test]
    fn test_stored_shape_matches_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["ccy"], "USDT");
        assert_eq!(json["initialEquity"], 10000.0);

        let loaded: Settings = serde_json::from_str(r#"{"ccy":"USD","initialEquity":"500"}"#).unwrap();
        assert_eq!(loaded.initial_equity, dec!(500));
    }
}
