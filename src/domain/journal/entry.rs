use crate::domain::errors::JournalError;
use crate::domain::numeric;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tickers offered in the preset picker
pub const DEFAULT_TICKERS: &[&str] = &["BTC/USDT", "ETH/USDT", "SOL/USDT", "XRP/USDT", "BNB/USDT"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    #[default]
    Long,
    Short,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "LONG"),
            Side::Short => write!(f, "SHORT"),
        }
    }
}

impl FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LONG" | "L" => Ok(Side::Long),
            "SHORT" | "S" => Ok(Side::Short),
            _ => anyhow::bail!("Invalid side: {}. Must be 'LONG' or 'SHORT'", s),
        }
    }
}

/// A single recorded trade outcome.
///
/// `date` is kept as the ISO `YYYY-MM-DD` string the user entered (possibly
/// empty); daily grouping compares these strings directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default = "fresh_id")]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default, deserialize_with = "side_or_default")]
    pub side: Side,
    #[serde(with = "numeric::lenient", default)]
    pub pnl: Decimal,
    #[serde(default)]
    pub reason: String,
}

impl Entry {
    pub fn has_date(&self) -> bool {
        !self.date.is_empty()
    }
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Stored sides are matched case-insensitively; anything else reads as LONG.
fn side_or_default<'de, D>(deserializer: D) -> Result<Side, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(raw)) => raw.parse().unwrap_or_default(),
        _ => Side::default(),
    })
}

/// Raw form input for a new entry, before normalization.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub date: String,
    /// Ticker picked from the preset list, used when `symbol` is blank
    pub preset: String,
    pub symbol: String,
    pub side: Side,
    pub pnl: String,
    pub reason: String,
}

impl EntryDraft {
    /// Turn the draft into an entry with a fresh id.
    ///
    /// PnL goes through the numeric coercion policy; the only rejection is a
    /// missing ticker.
    pub fn into_entry(self) -> Result<Entry, JournalError> {
        let raw_symbol = if self.symbol.trim().is_empty() {
            &self.preset
        } else {
            &self.symbol
        };
        let symbol = normalize_ticker(raw_symbol);
        if symbol.is_empty() {
            return Err(JournalError::MissingTicker);
        }

        Ok(Entry {
            id: Uuid::new_v4().to_string(),
            date: self.date.trim().to_string(),
            symbol,
            side: self.side,
            pnl: numeric::coerce_decimal(&self.pnl),
            reason: self.reason.trim().to_string(),
        })
    }
}

/// Normalize a user-typed ticker: `" btc-usdt "` becomes `"BTC/USDT"`.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '-' || c == '_' { '/' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker(" btc-usdt "), "BTC/USDT");
        assert_eq!(normalize_ticker("eth_usdt"), "ETH/USDT");
        assert_eq!(normalize_ticker("sol / usdt"), "SOL/USDT");
        assert_eq!(normalize_ticker("XRP/USDT"), "XRP/USDT");
        assert_eq!(normalize_ticker("   "), "");
    }

    #[test]
    fn test_draft_prefers_typed_symbol_over_preset() {
        let draft = EntryDraft {
            date: "2024-03-01".to_string(),
            preset: "BTC/USDT".to_string(),
            symbol: "eth-usdt".to_string(),
            side: Side::Short,
            pnl: "-12.5".to_string(),
            reason: "  faded the pump ".to_string(),
        };

        let entry = draft.into_entry().unwrap();
        assert_eq!(entry.symbol, "ETH/USDT");
        assert_eq!(entry.side, Side::Short);
        assert_eq!(entry.pnl, dec!(-12.5));
        assert_eq!(entry.reason, "faded the pump");
        assert!(Uuid::parse_str(&entry.id).is_ok());
    }

    #[test]
    fn test_draft_falls_back_to_preset() {
        let draft = EntryDraft {
            preset: "SOL/USDT".to_string(),
            pnl: "40".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.into_entry().unwrap().symbol, "SOL/USDT");
    }

    #[test]
    fn test_draft_without_ticker_is_rejected() {
        let draft = EntryDraft {
            pnl: "10".to_string(),
            ..Default::default()
        };
        assert!(matches!(draft.into_entry(), Err(JournalError::MissingTicker)));
    }

    #[test]
    fn test_draft_invalid_pnl_becomes_zero() {
        let draft = EntryDraft {
            symbol: "BTC/USDT".to_string(),
            pnl: "lots".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.into_entry().unwrap().pnl, Decimal::ZERO);
    }

    #[test]
    fn test_side_parsing_and_json_shape() {
        assert_eq!("long".parse::<Side>().unwrap(), Side::Long);
        assert_eq!(" SHORT ".parse::<Side>().unwrap(), Side::Short);
        assert!("flat".parse::<Side>().is_err());
        assert_eq!(serde_json::to_string(&Side::Short).unwrap(), "\"SHORT\"");
    }

    #[test]
    fn test_entry_reads_loose_stored_json() {
        let json = r#"{"id":"a1","date":"2024-01-02","symbol":"BTC/USDT","side":"LONG","pnl":null,"reason":"x"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.pnl, Decimal::ZERO);
        assert!(entry.has_date());
    }

    #[test]
    fn test_entry_tolerates_loose_side_and_missing_id() {
        let json = r#"{"date":"2024-01-02","symbol":"BTC/USDT","side":"short","pnl":3}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.side, Side::Short);
        assert!(Uuid::parse_str(&entry.id).is_ok());

        for side in [r#""sideways""#, "7", "null"] {
            let json = format!(r#"{{"id":"b","side":{side}}}"#);
            let entry: Entry = serde_json::from_str(&json).unwrap();
            assert_eq!(entry.side, Side::Long, "side {side}");
        }
    }
}
