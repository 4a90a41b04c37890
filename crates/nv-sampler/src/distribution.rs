use serde::{Deserialize, Serialize};

use crate::score::Item;
use crate::temperature::clamp_temperature;

/// An item together with its probability under the current temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    /// Position of the item in the score set, used as the tie-break when ranking.
    pub index: usize,
    pub label: String,
    pub raw_score: f64,
    pub probability: f64,
}

/// Numerically stable softmax of the raw scores at `temperature`.
///
/// 1. Clamps the temperature to the floor.
/// 2. Subtracts the maximum raw score, then scales by `1 / temperature`.
/// 3. Exponentiates and normalizes by the sum.
///
/// Every shifted score is `<= 0`, so huge scores or tiny temperatures can only
/// underflow to zero, never overflow.
///
/// The output keeps the input order.
pub fn compute_distribution(items: &[Item], temperature: f64) -> Vec<ScoredItem> {
    if items.is_empty() {
        return Vec::new();
    }

    let temp = clamp_temperature(temperature);
    let max_raw = items
        .iter()
        .map(|it| it.raw_score)
        .fold(f64::NEG_INFINITY, f64::max);

    let exps: Vec<f64> = items
        .iter()
        .map(|it| ((it.raw_score - max_raw) / temp).exp())
        .collect();
    // The max item contributes exp(0) = 1, so the sum is never zero.
    let sum: f64 = exps.iter().sum();

    items
        .iter()
        .zip(exps)
        .enumerate()
        .map(|(index, (item, e))| ScoredItem {
            index,
            label: item.label.clone(),
            raw_score: item.raw_score,
            probability: e / sum,
        })
        .collect()
}
