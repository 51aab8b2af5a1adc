use super::aggregator::DailyAggregate;
use crate::domain::numeric::saturating_div;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityPoint {
    pub date: String,
    pub equity: Decimal,
}

/// Relative distance from the running peak. Always `<= 0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawdownPoint {
    pub date: String,
    pub peak: Decimal,
    pub drawdown: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EquitySeries {
    pub equity: Vec<EquityPoint>,
    pub drawdown: Vec<DrawdownPoint>,
    /// Most negative drawdown seen, `0` when equity never dipped below its peak
    pub max_drawdown: Decimal,
}

impl EquitySeries {
    pub fn final_equity(&self) -> Option<Decimal> {
        self.equity.last().map(|p| p.equity)
    }
}

/// Replay the daily PnL series on top of `initial_equity`.
///
/// The peak is seeded with the initial equity and includes the current day,
/// so a new high always reads as a drawdown of zero. A non-positive peak has
/// no meaningful ratio and reports zero.
pub fn compute_equity_series(daily: &[DailyAggregate], initial_equity: Decimal) -> EquitySeries {
    let mut equity = initial_equity;
    let mut peak = initial_equity;
    let mut max_drawdown = Decimal::ZERO;

    let mut equity_points = Vec::with_capacity(daily.len());
    let mut drawdown_points = Vec::with_capacity(daily.len());

    for day in daily {
        equity = equity.saturating_add(day.pnl);
        equity_points.push(EquityPoint {
            date: day.date.clone(),
            equity,
        });

        peak = peak.max(equity);
        let drawdown = if peak > Decimal::ZERO {
            saturating_div(equity.saturating_sub(peak), peak)
        } else {
            Decimal::ZERO
        };
        drawdown_points.push(DrawdownPoint {
            date: day.date.clone(),
            peak,
            drawdown,
        });

        max_drawdown = max_drawdown.min(drawdown);
    }

    EquitySeries {
        equity: equity_points,
        drawdown: drawdown_points,
        max_drawdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn days(pnls: &[Decimal]) -> Vec<DailyAggregate> {
        pnls.iter()
            .enumerate()
            .map(|(i, pnl)| DailyAggregate {
                date: format!("2024-05-{:02}", i + 1),
                pnl: *pnl,
            })
            .collect()
    }

    #[test]
    fn test_known_sequence() {
        let series = compute_equity_series(
            &days(&[dec!(100), dec!(-50), dec!(-80), dec!(30)]),
            dec!(1000),
        );

        let equity: Vec<_> = series.equity.iter().map(|p| p.equity).collect();
        assert_eq!(equity, vec![dec!(1100), dec!(1050), dec!(970), dec!(1000)]);

        let peaks: Vec<_> = series.drawdown.iter().map(|p| p.peak).collect();
        assert_eq!(peaks, vec![dec!(1100); 4]);

        let dd: Vec<_> = series
            .drawdown
            .iter()
            .map(|p| p.drawdown.round_dp(5))
            .collect();
        assert_eq!(dd, vec![dec!(0), dec!(-0.04545), dec!(-0.11818), dec!(-0.09091)]);

        assert_eq!(series.max_drawdown.round_dp(5), dec!(-0.11818));
        assert_eq!(series.final_equity(), Some(dec!(1000)));
    }

    #[test]
    fn test_flat_series_has_no_drawdown() {
        let series = compute_equity_series(&days(&[Decimal::ZERO; 5]), dec!(2500));
        assert!(series.equity.iter().all(|p| p.equity == dec!(2500)));
        assert_eq!(series.max_drawdown, Decimal::ZERO);
    }

    #[test]
    fn test_zero_initial_equity_does_not_divide_by_zero() {
        let series = compute_equity_series(&days(&[dec!(-10), dec!(50), dec!(-25)]), Decimal::ZERO);
        // day 1: peak stays 0 -> drawdown 0 by definition
        assert_eq!(series.drawdown[0].drawdown, Decimal::ZERO);
        assert_eq!(series.drawdown[2].drawdown, dec!(-25) / dec!(40));
        assert_eq!(series.max_drawdown, dec!(-0.625));
    }

    #[test]
    fn test_losses_from_the_start_count_against_initial_peak() {
        let series = compute_equity_series(&days(&[dec!(-100), dec!(-100)]), dec!(1000));
        assert_eq!(series.max_drawdown, dec!(-0.2));
    }

    #[test]
    fn test_extreme_values_clamp() {
        let series = compute_equity_series(&days(&[Decimal::MAX, Decimal::MIN, Decimal::MIN]), dec!(1));
        assert_eq!(series.equity[0].equity, Decimal::MAX);
        assert_eq!(series.equity[2].equity, Decimal::MIN);
        assert_eq!(series.drawdown[2].peak, Decimal::MAX);
        assert!(series.max_drawdown < Decimal::ZERO);

        let tiny_peak = compute_equity_series(&days(&[Decimal::MIN]), dec!(0.0001));
        assert_eq!(tiny_peak.max_drawdown, Decimal::MIN);
    }

    #[test]
    fn test_empty_series() {
        let series = compute_equity_series(&[], dec!(1000));
        assert!(series.equity.is_empty());
        assert_eq!(series.max_drawdown, Decimal::ZERO);
        assert_eq!(series.final_equity(), None);
    }
}
