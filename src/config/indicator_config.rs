//! Market indicator poller settings.

use crate::infrastructure::coingecko::DEFAULT_BASE_URL;
use crate::infrastructure::sentiment::DEFAULT_FNG_URL;
use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorEnvConfig {
    pub enabled: bool,
    pub poll_interval: Duration,
    pub coingecko_base_url: String,
    pub fear_greed_url: String,
    pub http_timeout: Duration,
}

impl Default for IndicatorEnvConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval: Duration::from_secs(60),
            coingecko_base_url: DEFAULT_BASE_URL.to_string(),
            fear_greed_url: DEFAULT_FNG_URL.to_string(),
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl IndicatorEnvConfig {
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            enabled: lookup("INDICATORS_ENABLED")
                .map(|v| v.trim().parse::<bool>().unwrap_or(true))
                .unwrap_or(defaults.enabled),
            poll_interval: secs(lookup, "INDICATOR_POLL_INTERVAL_SECS")?
                .unwrap_or(defaults.poll_interval),
            coingecko_base_url: lookup("COINGECKO_BASE_URL")
                .unwrap_or(defaults.coingecko_base_url),
            fear_greed_url: lookup("FEAR_GREED_URL").unwrap_or(defaults.fear_greed_url),
            http_timeout: secs(lookup, "HTTP_TIMEOUT_SECS")?.unwrap_or(defaults.http_timeout),
        })
    }
}

/// Positive whole seconds
fn secs(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid {}: {}", key, raw))?;
    if value == 0 {
        anyhow::bail!("{} must be greater than zero", key);
    }
    Ok(Some(Duration::from_secs(value)))
}
