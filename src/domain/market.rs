use crate::domain::sentiment::Sentiment;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Latest values of the header indicators. Each field is replaced only by a
/// successful lookup, so a failed poll keeps showing the previous reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketIndicators {
    pub krw_per_usdt: Option<Decimal>,
    pub btc_dominance: Option<f64>,
    pub fear_greed: Option<Sentiment>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MarketIndicators {
    pub fn dominance_label(&self) -> Option<String> {
        self.btc_dominance.map(|d| format!("{:.2}%", d))
    }

    pub fn fear_greed_label(&self) -> Option<String> {
        self.fear_greed
            .as_ref()
            .map(|s| format!("{} ({})", s.value, s.classification))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentiment::SentimentClassification;

    #[test]
    fn test_labels() {
        let indicators = MarketIndicators {
            btc_dominance: Some(54.3219),
            fear_greed: Some(Sentiment {
                value: 72,
                classification: SentimentClassification::from_score(72),
                timestamp: Utc::now(),
                source: "test".to_string(),
            }),
            ..Default::default()
        };
        assert_eq!(indicators.dominance_label().as_deref(), Some("54.32%"));
        assert_eq!(indicators.fear_greed_label().as_deref(), Some("72 (Greed)"));
        assert_eq!(MarketIndicators::default().dominance_label(), None);
    }
}
