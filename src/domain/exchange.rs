use crate::domain::errors::LinkError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub const SUPPORTED_EXCHANGES: &[&str] = &["Binance", "Bybit", "OKX", "Upbit", "Bithumb"];

pub const MIN_CREDENTIAL_LEN: usize = 8;

/// How long the demo handshake pretends to take
pub const HANDSHAKE_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub linked: bool,
    pub at: DateTime<Utc>,
}

pub type LinkMap = BTreeMap<String, LinkRecord>;

/// Credentials typed into the link panel. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct LinkRequest {
    pub exchange: String,
    pub api_key: String,
    pub api_secret: String,
    pub passphrase: String,
}

impl LinkRequest {
    pub fn new(exchange: &str, api_key: &str, api_secret: &str, passphrase: &str) -> Self {
        Self {
            exchange: exchange.to_string(),
            api_key: api_key.trim().to_string(),
            api_secret: api_secret.trim().to_string(),
            passphrase: passphrase.trim().to_string(),
        }
    }

    /// Checks that fail before the handshake starts
    pub fn validate(&self) -> Result<(), LinkError> {
        if !SUPPORTED_EXCHANGES.contains(&self.exchange.as_str()) {
            return Err(LinkError::UnknownExchange {
                exchange: self.exchange.clone(),
            });
        }
        if self.api_key.chars().count() < MIN_CREDENTIAL_LEN
            || self.api_secret.chars().count() < MIN_CREDENTIAL_LEN
        {
            return Err(LinkError::CredentialsTooShort {
                min: MIN_CREDENTIAL_LEN,
            });
        }
        Ok(())
    }

    /// Outcome of the simulated handshake: any credential containing "fail"
    /// is rejected, everything else links.
    pub fn handshake(&self) -> Result<(), LinkError> {
        let combined = format!("{}{}{}", self.api_key, self.api_secret, self.passphrase);
        if combined.to_lowercase().contains("fail") {
            return Err(LinkError::Rejected {
                exchange: self.exchange.clone(),
            });
        }
        Ok(())
    }
}
