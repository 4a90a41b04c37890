use std::collections::HashMap;

use nv_layout::PositionedItem;
use serde::{Deserialize, Serialize};

/// The three values the control surface supplies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    pub top_k: usize,
    pub top_p: f64,
    pub temperature: f64,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            top_k: 50,
            top_p: 1.0,
            temperature: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayItem {
    #[serde(flatten)]
    pub item: PositionedItem,
    /// Probability as a percentage with two decimals, e.g. `"65.90%"`.
    pub percentage: String,
}

/// Output of one recompute cycle, keyed by label for reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub controls: Controls,
    pub items: Vec<DisplayItem>,
    pub realized_cumulative_mass: f64,
    /// `realized_cumulative_mass` with four decimals.
    pub mass_readout: String,
    /// Labels not shown in the previous frame.
    pub entering: Vec<String>,
    /// Labels shown in the previous frame but not in this one.
    pub exiting: Vec<String>,
}

impl Frame {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|d| d.item.label.as_str())
    }

    /// Linear scan in rank order; use [`Frame::by_label`] for repeated lookups.
    pub fn get(&self, label: &str) -> Option<&DisplayItem> {
        self.items.iter().find(|d| d.item.label == label)
    }

    /// Items keyed by label, for enter/update/exit reconciliation.
    pub fn by_label(&self) -> HashMap<&str, &DisplayItem> {
        self.items
            .iter()
            .map(|d| (d.item.label.as_str(), d))
            .collect()
    }
}
