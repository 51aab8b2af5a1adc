use crate::domain::journal::Entry;
use crate::domain::performance::PerformanceAnalysis;
use crate::domain::settings::Settings;
use rust_decimal::Decimal;
use serde::Serialize;

/// View/export model: the performance analysis plus the settings it was
/// computed under and the KRW conversion, if one applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalReport {
    pub settings: Settings,
    pub analysis: PerformanceAnalysis,
    /// Entries in the order they were recorded
    pub entries: Vec<Entry>,
    /// Set only when the base currency is USDT and a rate has been fetched
    pub krw_per_usdt: Option<Decimal>,
}

impl JournalReport {
    pub fn build(entries: &[Entry], settings: &Settings, krw_per_usdt: Option<Decimal>) -> Self {
        Self {
            settings: settings.clone(),
            analysis: PerformanceAnalysis::analyze(entries, settings.initial_equity),
            entries: entries.to_vec(),
            krw_per_usdt: krw_per_usdt.filter(|_| settings.is_usdt()),
        }
    }

    /// KRW equivalent rounded to two decimals
    pub fn to_krw(&self, amount: Decimal) -> Option<Decimal> {
        self.krw_per_usdt
            .map(|rate| amount.saturating_mul(rate).round_dp(2))
    }

    /// Entries ordered for the journal table (by date, stable)
    pub fn table_rows(&self) -> Vec<&Entry> {
        let mut rows: Vec<&Entry> = self.entries.iter().collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date));
        rows
    }
}
