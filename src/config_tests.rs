use crate::config::{Config, DATA_DIR_NAME};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn test_defaults_use_home_directory() {
    let config = config_from(&[("HOME", "/home/trader")]).unwrap();

    assert_eq!(config.data_dir, PathBuf::from("/home/trader").join(DATA_DIR_NAME));
    assert_eq!(config.export_dir, PathBuf::from("."));
    assert!(config.indicators.enabled);
    assert_eq!(config.indicators.poll_interval, Duration::from_secs(60));
    assert_eq!(config.indicators.http_timeout, Duration::from_secs(10));
    assert_eq!(
        config.indicators.coingecko_base_url,
        "https://api.coingecko.com/api/v3"
    );
    assert_eq!(
        config.indicators.fear_greed_url,
        "https://api.alternative.me/fng/"
    );
}

#[test]
fn test_overrides() {
    let config = config_from(&[
        ("COINPNL_DATA_DIR", "/data/journal"),
        ("EXPORT_DIR", "/tmp/out"),
        ("INDICATORS_ENABLED", "false"),
        ("INDICATOR_POLL_INTERVAL_SECS", "15"),
        ("HTTP_TIMEOUT_SECS", "3"),
        ("COINGECKO_BASE_URL", "http://localhost:9000"),
    ])
    .unwrap();

    assert_eq!(config.data_dir, PathBuf::from("/data/journal"));
    assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
    assert!(!config.indicators.enabled);
    assert_eq!(config.indicators.poll_interval, Duration::from_secs(15));
    assert_eq!(config.indicators.http_timeout, Duration::from_secs(3));
    assert_eq!(config.indicators.coingecko_base_url, "http://localhost:9000");
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    let config = config_from(&[
        ("HOME", "/home/trader"),
        ("COINPNL_DATA_DIR", "  "),
        ("INDICATOR_POLL_INTERVAL_SECS", ""),
    ])
    .unwrap();

    assert_eq!(config.data_dir, PathBuf::from("/home/trader/.coinpnl"));
    assert_eq!(config.indicators.poll_interval, Duration::from_secs(60));
}

#[test]
fn test_invalid_intervals_are_rejected() {
    let err = config_from(&[("HOME", "/h"), ("INDICATOR_POLL_INTERVAL_SECS", "soon")]).unwrap_err();
    assert!(format!("{:#}", err).contains("INDICATOR_POLL_INTERVAL_SECS"));

    assert!(config_from(&[("HOME", "/h"), ("HTTP_TIMEOUT_SECS", "0")]).is_err());
}

#[test]
fn test_missing_home_without_data_dir_is_an_error() {
    assert!(config_from(&[]).is_err());
}
