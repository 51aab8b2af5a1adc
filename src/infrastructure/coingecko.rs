//! CoinGecko public API: USDT→KRW rate and BTC market dominance.

use crate::domain::ports::{DominanceProvider, ExchangeRateProvider};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    tether: Option<TetherPrice>,
}

#[derive(Debug, Deserialize)]
struct TetherPrice {
    krw: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GlobalResponse {
    data: GlobalData,
}

#[derive(Debug, Deserialize)]
struct GlobalData {
    market_cap_percentage: std::collections::HashMap<String, f64>,
}

pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("CoinGecko API returned status: {}", response.status());
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse CoinGecko response from {}", path))
    }
}

fn krw_rate(body: SimplePriceResponse) -> Result<Decimal> {
    let krw = body
        .tether
        .and_then(|t| t.krw)
        .context("No tether/krw price in response")?;
    Decimal::from_f64(krw).context("USDT/KRW rate is not a finite number")
}

fn btc_share(body: GlobalResponse) -> Result<f64> {
    body.data
        .market_cap_percentage
        .get("btc")
        .copied()
        .context("No btc entry in market_cap_percentage")
}

#[async_trait]
impl ExchangeRateProvider for CoinGeckoClient {
    async fn usdt_krw(&self) -> Result<Decimal> {
        let body: SimplePriceResponse = self
            .get_json("simple/price", &[("ids", "tether"), ("vs_currencies", "krw")])
            .await?;
        krw_rate(body)
    }
}

#[async_trait]
impl DominanceProvider for CoinGeckoClient {
    async fn btc_dominance(&self) -> Result<f64> {
        let body: GlobalResponse = self.get_json("global", &[]).await?;
        btc_share(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_simple_price() {
        let body: SimplePriceResponse =
            serde_json::from_str(r#"{"tether":{"krw":1391.27}}"#).unwrap();
        assert_eq!(krw_rate(body).unwrap().round_dp(2), dec!(1391.27));

        let empty: SimplePriceResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(krw_rate(empty).is_err());
    }

    #[test]
    fn test_parse_global() {
        let body: GlobalResponse = serde_json::from_str(
            r#"{"data":{"active_cryptocurrencies":1,"market_cap_percentage":{"btc":56.41,"eth":12.02}}}"#,
        )
        .unwrap();
        assert!((btc_share(body).unwrap() - 56.41).abs() < 1e-9);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = CoinGeckoClient::new(Client::new(), "http://localhost:9999/api/v3/");
        assert_eq!(client.base_url, "http://localhost:9999/api/v3");
    }
}
