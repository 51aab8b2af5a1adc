use crate::domain::journal::Entry;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Net PnL of every entry sharing a date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub date: String,
    pub pnl: Decimal,
}

/// Group entries by their date string and sum PnL per day.
///
/// Entries without a date are skipped. Output is ascending by date; ISO
/// dates make lexicographic order chronological. Sums clamp at the decimal
/// bounds.
pub fn aggregate_daily(entries: &[Entry]) -> Vec<DailyAggregate> {
    let mut by_date: BTreeMap<&str, Decimal> = BTreeMap::new();

    for entry in entries.iter().filter(|e| e.has_date()) {
        let day = by_date.entry(entry.date.as_str()).or_insert(Decimal::ZERO);
        *day = day.saturating_add(entry.pnl);
    }

    by_date
        .into_iter()
        .map(|(date, pnl)| DailyAggregate {
            date: date.to_string(),
            pnl,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journal::Side;
    use rust_decimal_macros::dec;

    fn entry(id: &str, date: &str, pnl: Decimal) -> Entry {
        Entry {
            id: id.to_string(),
            date: date.to_string(),
            symbol: "BTC/USDT".to_string(),
            side: Side::Long,
            pnl,
            reason: String::new(),
        }
    }

    #[test]
    fn test_groups_and_sorts_by_date() {
        let entries = vec![
            entry("a", "2024-01-03", dec!(30)),
            entry("b", "2024-01-01", dec!(100)),
            entry("c", "2024-01-03", dec!(-5)),
            entry("d", "2024-01-02", dec!(-50)),
        ];

        let daily = aggregate_daily(&entries);
        assert_eq!(
            daily,
            vec![
                DailyAggregate { date: "2024-01-01".into(), pnl: dec!(100) },
                DailyAggregate { date: "2024-01-02".into(), pnl: dec!(-50) },
                DailyAggregate { date: "2024-01-03".into(), pnl: dec!(25) },
            ]
        );
    }

    #[test]
    fn test_skips_undated_entries() {
        let entries = vec![entry("a", "", dec!(999)), entry("b", "2024-02-01", dec!(1))];
        let daily = aggregate_daily(&entries);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].pnl, dec!(1));
    }

    #[test]
    fn test_day_total_clamps_instead_of_overflowing() {
        let entries = vec![
            entry("a", "2024-03-01", Decimal::MAX),
            entry("b", "2024-03-01", dec!(1)),
        ];
        let daily = aggregate_daily(&entries);
        assert_eq!(daily[0].pnl, Decimal::MAX);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_daily(&[]).is_empty());
    }
}
