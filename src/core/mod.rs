//! Core domain logic: records, totals, formatting and the table engine

pub mod api;
pub mod config;
pub mod format;
pub mod log;
pub mod model;
pub mod table;
pub mod totals;

// Re-export main types for cleaner imports
pub use api::InvestorApi;
pub use format::format_number;
pub use model::{Commitment, Investor};
pub use totals::AssetClassTotals;

#[cfg(test)]
pub(crate) mod test_support;
