use super::model::Commitment;
use std::collections::HashMap;

/// Summed commitment amounts per asset class.
///
/// Classes keep the order in which they first appear in the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetClassTotals {
    totals: Vec<(String, f64)>,
}

impl AssetClassTotals {
    pub fn from_commitments(commitments: &[Commitment]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut totals: Vec<(String, f64)> = Vec::new();

        for commitment in commitments {
            match index.get(commitment.asset_class.as_str()) {
                Some(&i) => totals[i].1 += commitment.amount,
                None => {
                    index.insert(&commitment.asset_class, totals.len());
                    totals.push((commitment.asset_class.clone(), commitment.amount));
                }
            }
        }

        Self { totals }
    }

    /// Sum of every per-class total.
    pub fn all(&self) -> f64 {
        self.totals.iter().map(|(_, total)| total).sum()
    }

    pub fn get(&self, asset_class: &str) -> Option<f64> {
        self.totals
            .iter()
            .find(|(label, _)| label == asset_class)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals
            .iter()
            .map(|(label, total)| (label.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}
