use crate::domain::ports::SentimentProvider;
use crate::domain::sentiment::{Sentiment, SentimentClassification};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_FNG_URL: &str = "https://api.alternative.me/fng/";

#[derive(Debug, Deserialize)]
struct AlternativeMeResponse {
    data: Vec<AlternativeMeData>,
}

#[derive(Debug, Deserialize)]
struct AlternativeMeData {
    value: String,
    timestamp: Option<String>,
}

pub struct AlternativeMeSentimentProvider {
    client: Client,
    url: String,
}

impl AlternativeMeSentimentProvider {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

fn parse_sentiment(body: AlternativeMeResponse) -> anyhow::Result<Sentiment> {
    let Some(data) = body.data.first() else {
        anyhow::bail!("No sentiment data found in response");
    };

    let value: u8 = data.value.trim().parse().context("Failed to parse sentiment value")?;
    let timestamp: DateTime<Utc> = data
        .timestamp
        .as_deref()
        .and_then(|ts| ts.parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .unwrap_or_else(Utc::now);

    // Re-classify based on our domain rules to ensure consistency
    Ok(Sentiment {
        value,
        classification: SentimentClassification::from_score(value),
        timestamp,
        source: "Alternative.me (Crypto Fear & Greed)".to_string(),
    })
}

#[async_trait]
impl SentimentProvider for AlternativeMeSentimentProvider {
    async fn fetch_sentiment(&self) -> anyhow::Result<Sentiment> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to send request to Alternative.me")?;

        if !response.status().is_success() {
            anyhow::bail!("Alternative.me API returned status: {}", response.status());
        }

        let body: AlternativeMeResponse = response
            .json()
            .await
            .context("Failed to parse Alternative.me response")?;

        let sentiment = parse_sentiment(body)?;
        debug!("Fear & Greed: {} ({})", sentiment.value, sentiment.classification);
        Ok(sentiment)
    }
}
