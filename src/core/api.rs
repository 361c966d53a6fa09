//! Data access abstraction for the investors API

use super::model::{Commitment, Investor};
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

/// Client for the investors API.
///
/// Views call the fallible `fetch_*` methods so they can tell a failed load from an
/// empty one. `get_*` keep the never-fail contract: errors are logged and become empty lists.
#[async_trait]
pub trait InvestorApi: Send + Sync {
    async fn fetch_investors(&self) -> Result<Vec<Investor>>;

    async fn fetch_commitments(&self, investor_id: &str) -> Result<Vec<Commitment>>;

    /// Lists investors, logging any failure and returning an empty list instead.
    async fn get_investors(&self) -> Vec<Investor> {
        self.fetch_investors().await.unwrap_or_else(|e| {
            error!(error = ?e, "Failed to fetch investors");
            Vec::new()
        })
    }

    /// Lists an investor's commitments, logging any failure and returning an empty list instead.
    async fn get_commitments(&self, investor_id: &str) -> Vec<Commitment> {
        self.fetch_commitments(investor_id)
            .await
            .unwrap_or_else(|e| {
                error!(error = ?e, investor_id, "Failed to fetch commitments");
                Vec::new()
            })
    }
}
