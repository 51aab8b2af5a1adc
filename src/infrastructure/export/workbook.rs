use crate::application::report::JournalReport;
use crate::domain::performance::to_percent;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub const RATE_SOURCE: &str = "CoinGecko (USDT→KRW)";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn amount(value: Decimal) -> Self {
        Cell::Number(value.to_f64().unwrap_or(0.0))
    }

    fn optional(value: Option<Decimal>) -> Self {
        value.map(Cell::amount).unwrap_or(Cell::Empty)
    }

    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Plain-text rendering used by CSV output
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

/// Format-independent workbook: `Entries`, `DailyPnL`, `Equity`, `Summary`.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn from_report(report: &JournalReport) -> Self {
        Self {
            sheets: vec![
                entries_sheet(report),
                daily_sheet(report),
                equity_sheet(report),
                summary_sheet(report),
            ],
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

fn entries_sheet(report: &JournalReport) -> Sheet {
    let rows = report
        .entries
        .iter()
        .map(|e| {
            vec![
                Cell::text(&e.date),
                Cell::text(&e.symbol),
                Cell::text(e.side.to_string()),
                Cell::amount(e.pnl),
                Cell::optional(report.to_krw(e.pnl)),
                Cell::text(&e.reason),
            ]
        })
        .collect();

    Sheet {
        name: "Entries".to_string(),
        headers: vec!["Date", "Symbol", "Side", "PnL", "PnL_KRW", "Reason"],
        rows,
    }
}

fn daily_sheet(report: &JournalReport) -> Sheet {
    let rows = report
        .analysis
        .daily
        .iter()
        .map(|d| {
            vec![
                Cell::text(&d.date),
                Cell::amount(d.pnl),
                Cell::optional(report.to_krw(d.pnl)),
            ]
        })
        .collect();

    Sheet {
        name: "DailyPnL".to_string(),
        headers: vec!["Date", "DailyPnL", "DailyPnL_KRW"],
        rows,
    }
}

fn equity_sheet(report: &JournalReport) -> Sheet {
    let series = &report.analysis.series;
    let rows = series
        .equity
        .iter()
        .zip(&series.drawdown)
        .map(|(eq, dd)| {
            vec![
                Cell::text(&eq.date),
                Cell::amount(eq.equity),
                Cell::amount(to_percent(dd.drawdown)),
            ]
        })
        .collect();

    Sheet {
        name: "Equity".to_string(),
        headers: vec!["Date", "Equity", "DrawdownPct"],
        rows,
    }
}

fn summary_sheet(report: &JournalReport) -> Sheet {
    let summary = &report.analysis.summary;
    Sheet {
        name: "Summary".to_string(),
        headers: vec![
            "Currency",
            "InitialEquity",
            "TotalPnL",
            "TotalPnL_KRW",
            "ReturnPct",
            "MDDPct",
            "RateSource",
        ],
        rows: vec![vec![
            Cell::text(&report.settings.ccy),
            Cell::amount(summary.initial_equity),
            Cell::amount(summary.total_pnl),
            Cell::optional(report.to_krw(summary.total_pnl)),
            Cell::amount(to_percent(summary.return_ratio)),
            Cell::amount(to_percent(summary.max_drawdown)),
            Cell::text(RATE_SOURCE),
        ]],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journal::{Entry, Side};
    use crate::domain::settings::Settings;
    use rust_decimal_macros::dec;

    fn entries() -> Vec<Entry> {
        [
            ("2024-01-02", dec!(-50)),
            ("2024-01-01", dec!(100)),
            ("2024-01-03", dec!(-80)),
            ("2024-01-04", dec!(30)),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (date, pnl))| Entry {
            id: i.to_string(),
            date: date.to_string(),
            symbol: "BTC/USDT".to_string(),
            side: Side::Long,
            pnl,
            reason: "plan".to_string(),
        })
        .collect()
    }

    #[test]
    fn test_sheet_order_and_headers() {
        let settings = Settings::default().with_update("", "1000");
        let report = JournalReport::build(&entries(), &settings, None);
        let wb = Workbook::from_report(&report);

        let names: Vec<_> = wb.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Entries", "DailyPnL", "Equity", "Summary"]);
        assert!(wb.sheets.iter().all(|s| s.rows.iter().all(|r| r.len() == s.headers.len())));
    }

    #[test]
    fn test_entries_keep_insertion_order_and_blank_krw_without_rate() {
        let report = JournalReport::build(&entries(), &Settings::default(), None);
        let wb = Workbook::from_report(&report);
        let sheet = wb.sheet("Entries").unwrap();

        assert_eq!(sheet.rows[0][0], Cell::Text("2024-01-02".into()));
        assert_eq!(sheet.rows[0][4], Cell::Empty);
    }

    #[test]
    fn test_equity_and_summary_values() {
        let settings = Settings::default().with_update("", "1000");
        let report = JournalReport::build(&entries(), &settings, Some(dec!(1400)));
        let wb = Workbook::from_report(&report);

        let equity = wb.sheet("Equity").unwrap();
        assert_eq!(equity.rows[2][1], Cell::Number(970.0));
        assert_eq!(equity.rows[2][2], Cell::Number(-11.82));

        let summary = &wb.sheet("Summary").unwrap().rows[0];
        assert_eq!(summary[0], Cell::Text("USDT".into()));
        assert_eq!(summary[3], Cell::Number(0.0));
        assert_eq!(summary[5], Cell::Number(-11.82));
        assert_eq!(summary[6], Cell::Text(RATE_SOURCE.into()));

        let daily = wb.sheet("DailyPnL").unwrap();
        assert_eq!(daily.rows[0][2], Cell::Number(140000.0));
    }
}
