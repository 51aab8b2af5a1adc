use super::aggregator::{DailyAggregate, aggregate_daily};
use super::equity::{EquitySeries, compute_equity_series};
use crate::domain::journal::Entry;
use crate::domain::numeric::{saturating_div, saturating_sum};
use rust_decimal::Decimal;
use serde::Serialize;

/// Headline numbers of the journal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub initial_equity: Decimal,
    /// Sum of daily PnL (dated entries only)
    pub total_pnl: Decimal,
    /// `final / initial - 1`, zero without an initial balance or any day
    pub return_ratio: Decimal,
    pub max_drawdown: Decimal,
    /// Initial balance plus every entry's PnL, dated or not
    pub net_equity: Decimal,
    pub trade_count: usize,
    pub trading_days: usize,
}

/// Everything derived from the entry list in one pass of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceAnalysis {
    pub daily: Vec<DailyAggregate>,
    pub series: EquitySeries,
    pub summary: PerformanceSummary,
}

impl PerformanceAnalysis {
    pub fn analyze(entries: &[Entry], initial_equity: Decimal) -> Self {
        let daily = aggregate_daily(entries);
        let series = compute_equity_series(&daily, initial_equity);

        let total_pnl = saturating_sum(daily.iter().map(|d| d.pnl));
        let return_ratio = match series.final_equity() {
            Some(last) if !initial_equity.is_zero() => {
                saturating_div(last, initial_equity).saturating_sub(Decimal::ONE)
            }
            _ => Decimal::ZERO,
        };
        let net_equity =
            initial_equity.saturating_add(saturating_sum(entries.iter().map(|e| e.pnl)));

        let summary = PerformanceSummary {
            initial_equity,
            total_pnl,
            return_ratio,
            max_drawdown: series.max_drawdown,
            net_equity,
            trade_count: entries.len(),
            trading_days: daily.len(),
        };

        Self {
            daily,
            series,
            summary,
        }
    }
}

/// Ratio to percent with two decimals (`-0.11818` → `-11.82`)
pub fn to_percent(ratio: Decimal) -> Decimal {
    ratio.saturating_mul(Decimal::ONE_HUNDRED).round_dp(2)
}
