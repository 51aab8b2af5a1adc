//! Configuration for CoinPNL.
//!
//! Everything comes from environment variables (optionally via `.env`).
//! `from_lookup` takes the variable source as a closure so parsing can be
//! tested without touching the process environment.

mod indicator_config;

pub use indicator_config::IndicatorEnvConfig;

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Directory under `$HOME` used when `COINPNL_DATA_DIR` is unset
pub const DATA_DIR_NAME: &str = ".coinpnl";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// One `<key>.json` file per storage key lives here
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub indicators: IndicatorEnvConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match lookup("COINPNL_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = lookup("HOME")
                    .context("Could not find HOME directory; set COINPNL_DATA_DIR")?;
                PathBuf::from(home).join(DATA_DIR_NAME)
            }
        };
        let export_dir = PathBuf::from(lookup("EXPORT_DIR").unwrap_or_else(|| ".".to_string()));
        let indicators =
            IndicatorEnvConfig::from_lookup(&lookup).context("Failed to load indicator config")?;

        Ok(Self {
            data_dir,
            export_dir,
            indicators,
        })
    }
}
