//! Records served by the investors API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Investor {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub investor_type: String,
    pub date_added: NaiveDate,
    pub country: String,
    pub total_commitment: f64,
}

/// A single capital allocation belonging to one investor.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Commitment {
    pub id: i64,
    pub asset_class: String,
    pub currency: String,
    pub amount: f64,
}
