use std::collections::HashSet;

/// `0.659` -> `"65.90%"`.
pub fn format_percentage(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// Cumulative-mass readout with four decimals.
pub fn format_mass(mass: f64) -> String {
    format!("{mass:.4}")
}

/// Enter / exit sets between two consecutive label lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub entering: Vec<String>,
    pub updating: Vec<String>,
    pub exiting: Vec<String>,
}

impl Reconciliation {
    /// `entering` and `updating` follow `current`'s order, `exiting` follows `previous`'s.
    pub fn between(previous: &[String], current: &[String]) -> Self {
        let before: HashSet<&str> = previous.iter().map(String::as_str).collect();
        let after: HashSet<&str> = current.iter().map(String::as_str).collect();

        let (updating, entering): (Vec<String>, Vec<String>) = current
            .iter()
            .cloned()
            .partition(|l| before.contains(l.as_str()));
        let exiting = previous
            .iter()
            .filter(|l| !after.contains(l.as_str()))
            .cloned()
            .collect();

        Self {
            entering,
            updating,
            exiting,
        }
    }
}
