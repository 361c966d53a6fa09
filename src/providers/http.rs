use crate::core::{Commitment, Investor, InvestorApi};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Fixed per-request timeout for every API call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Investors API over HTTP. No retries and no caching.
pub struct HttpInvestorApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpInvestorApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("investors/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Requesting {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?
            .error_for_status()
            .with_context(|| format!("Request to {url} was not successful"))?;

        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text from {url}"))?;

        serde_json::from_str(&response_text).with_context(|| {
            format!("Failed to parse response from {url}. Response: '{response_text}'")
        })
    }
}

#[async_trait]
impl InvestorApi for HttpInvestorApi {
    async fn fetch_investors(&self) -> Result<Vec<Investor>> {
        let investors: Vec<Investor> = self.get_json("/investors").await?;
        debug!("Fetched {} investors", investors.len());
        Ok(investors)
    }

    async fn fetch_commitments(&self, investor_id: &str) -> Result<Vec<Commitment>> {
        let commitments: Vec<Commitment> = self
            .get_json(&format!("/investors/{investor_id}/commitments"))
            .await?;
        debug!(
            "Fetched {} commitments for investor {}",
            commitments.len(),
            investor_id
        );
        Ok(commitments)
    }
}
