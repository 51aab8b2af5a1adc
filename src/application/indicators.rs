//! Header indicator poller
//!
//! Fetches the USDT→KRW rate, BTC dominance and the Fear & Greed index once
//! at start and then on a fixed interval for as long as the process runs.
//! Lookups are independent and best-effort: a failure is logged and the
//! previous value stays in place until the next tick.

use crate::domain::market::MarketIndicators;
use crate::domain::ports::{DominanceProvider, ExchangeRateProvider, SentimentProvider};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

pub type SharedIndicators = Arc<RwLock<MarketIndicators>>;

pub struct IndicatorService {
    rates: Arc<dyn ExchangeRateProvider>,
    dominance: Arc<dyn DominanceProvider>,
    sentiment: Arc<dyn SentimentProvider>,
    shared: SharedIndicators,
    interval: Duration,
}

impl IndicatorService {
    pub fn new(
        rates: Arc<dyn ExchangeRateProvider>,
        dominance: Arc<dyn DominanceProvider>,
        sentiment: Arc<dyn SentimentProvider>,
        interval: Duration,
    ) -> Self {
        Self {
            rates,
            dominance,
            sentiment,
            shared: Arc::new(RwLock::new(MarketIndicators::default())),
            interval,
        }
    }

    /// Write into an existing shared cell instead of a fresh one
    pub fn with_shared(mut self, shared: SharedIndicators) -> Self {
        self.shared = shared;
        self
    }

    pub fn shared(&self) -> SharedIndicators {
        self.shared.clone()
    }

    /// One polling cycle. Returns how many of the three lookups succeeded.
    pub async fn refresh_once(&self) -> usize {
        let mut updated = 0;

        match self.rates.usdt_krw().await {
            Ok(rate) => {
                debug!("USDT/KRW = {}", rate);
                self.shared.write().await.krw_per_usdt = Some(rate);
                updated += 1;
            }
            Err(e) => error!("USDT/KRW lookup failed: {:#}", e),
        }

        match self.dominance.btc_dominance().await {
            Ok(dominance) => {
                debug!("BTC dominance = {:.2}%", dominance);
                self.shared.write().await.btc_dominance = Some(dominance);
                updated += 1;
            }
            Err(e) => error!("BTC dominance lookup failed: {:#}", e),
        }

        match self.sentiment.fetch_sentiment().await {
            Ok(sentiment) => {
                self.shared.write().await.fear_greed = Some(sentiment);
                updated += 1;
            }
            Err(e) => error!("Fear & Greed lookup failed: {:#}", e),
        }

        if updated > 0 {
            self.shared.write().await.updated_at = Some(Utc::now());
        }
        updated
    }

    /// Poll forever. The first cycle runs immediately.
    pub async fn run(self) {
        info!("IndicatorService: polling every {:?}", self.interval);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let updated = self.refresh_once().await;
            debug!("IndicatorService: {}/3 indicators refreshed", updated);
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
