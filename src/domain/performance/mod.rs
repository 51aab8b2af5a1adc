// Performance tracking domain
pub mod aggregator;
pub mod equity;
pub mod summary;

pub use aggregator::{DailyAggregate, aggregate_daily};
pub use equity::{DrawdownPoint, EquityPoint, EquitySeries, compute_equity_series};
pub use summary::{PerformanceAnalysis, PerformanceSummary, to_percent};
