//! In-memory `InvestorApi` double for view and shell tests

use super::{Commitment, Investor, InvestorApi};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn investor(id: i64, name: &str, total_commitment: f64) -> Investor {
    Investor {
        id,
        name: name.to_string(),
        investor_type: "fund manager".to_string(),
        date_added: NaiveDate::from_ymd_opt(2000, 7, 6).unwrap(),
        country: "Singapore".to_string(),
        total_commitment,
    }
}

pub fn commitment(id: i64, asset_class: &str, amount: f64) -> Commitment {
    Commitment {
        id,
        asset_class: asset_class.to_string(),
        currency: "GBP".to_string(),
        amount,
    }
}

#[derive(Default)]
pub struct FakeApi {
    investors: Vec<Investor>,
    commitments: HashMap<String, Vec<Commitment>>,
    delays: HashMap<String, Duration>,
    failing: bool,
    calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_investors(mut self, investors: Vec<Investor>) -> Self {
        self.investors = investors;
        self
    }

    pub fn with_commitments(mut self, investor_id: &str, commitments: Vec<Commitment>) -> Self {
        self.commitments.insert(investor_id.to_string(), commitments);
        self
    }

    /// Delays the commitments response for one investor.
    pub fn with_delay(mut self, investor_id: &str, delay: Duration) -> Self {
        self.delays.insert(investor_id.to_string(), delay);
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Number of fetches made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InvestorApi for FakeApi {
    async fn fetch_investors(&self) -> Result<Vec<Investor>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(anyhow!("connection refused"));
        }
        Ok(self.investors.clone())
    }

    async fn fetch_commitments(&self, investor_id: &str) -> Result<Vec<Commitment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(investor_id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing {
            return Err(anyhow!("connection refused"));
        }
        Ok(self
            .commitments
            .get(investor_id)
            .cloned()
            .unwrap_or_default())
    }
}
