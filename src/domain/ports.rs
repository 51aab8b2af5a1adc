use crate::domain::errors::StorageError;
use crate::domain::sentiment::Sentiment;
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Durable string key-value storage, the journal's only persistence seam.
///
/// Values are JSON documents; interpreting them is the caller's job.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Current price of one USDT in KRW
    async fn usdt_krw(&self) -> Result<Decimal>;
}

#[async_trait]
pub trait DominanceProvider: Send + Sync {
    /// BTC share of total crypto market cap, in percent
    async fn btc_dominance(&self) -> Result<f64>;
}

#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Fetch the current market sentiment
    async fn fetch_sentiment(&self) -> Result<Sentiment>;
}
