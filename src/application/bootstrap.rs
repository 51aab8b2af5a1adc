use crate::application::indicators::IndicatorService;
use crate::application::journal::Journal;
use crate::config::{Config, IndicatorEnvConfig};
use crate::infrastructure::coingecko::CoinGeckoClient;
use crate::infrastructure::http_client_factory::HttpClientFactory;
use crate::infrastructure::sentiment::AlternativeMeSentimentProvider;
use crate::infrastructure::storage::FileKeyValueStore;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Journal backed by the configured data directory
pub fn open_journal(config: &Config) -> Result<Journal<FileKeyValueStore>> {
    let store = FileKeyValueStore::new(&config.data_dir).context("Failed to open journal store")?;
    Ok(Journal::open(store))
}

/// Poller wired to CoinGecko (rate and dominance) and alternative.me (F&G)
pub fn indicator_service(config: &IndicatorEnvConfig) -> IndicatorService {
    let client = HttpClientFactory::create_client(config.http_timeout);
    let coingecko = Arc::new(CoinGeckoClient::new(
        client.clone(),
        config.coingecko_base_url.clone(),
    ));
    let sentiment = Arc::new(AlternativeMeSentimentProvider::new(
        client,
        config.fear_greed_url.clone(),
    ));

    IndicatorService::new(coingecko.clone(), coingecko, sentiment, config.poll_interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DATA_DIR_NAME;

    #[test]
    fn test_open_journal_creates_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().to_string_lossy().to_string();
        let config = Config::from_lookup(|key| (key == "HOME").then(|| home.clone())).unwrap();

        let journal = open_journal(&config).unwrap();
        assert!(tmp.path().join(DATA_DIR_NAME).is_dir());
        assert!(journal.entries().is_empty());
        assert!(journal.session().is_none());
    }
}
