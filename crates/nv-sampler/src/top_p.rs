use crate::distribution::ScoredItem;
use crate::truncation::Truncator;

/// Slack subtracted from the threshold so rounding in the running sum cannot
/// drop the item that exactly reaches it.
pub const TOP_P_EPSILON: f64 = 1e-9;

/// Nucleus truncation: keeps the shortest prefix whose cumulative probability
/// reaches `p`.
///
/// The item that crosses the threshold is kept and everything after it is
/// dropped. `p <= 0` still keeps the first item; `p >= 1` keeps the whole list.
pub struct TopP {
    p: f64,
}

impl TopP {
    /// Create a new top-p (nucleus) stage with the given probability threshold.
    pub fn new(p: f64) -> Self {
        Self { p }
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Truncator for TopP {
    fn name(&self) -> &str {
        "top_p"
    }

    fn apply(&self, ranked: &mut Vec<ScoredItem>) {
        let threshold = self.p - TOP_P_EPSILON;
        let mut cumulative = 0.0f64;
        let mut cutoff = ranked.len();
        for (i, item) in ranked.iter().enumerate() {
            cumulative += item.probability;
            if cumulative >= threshold {
                cutoff = i + 1;
                break;
            }
        }

        ranked.truncate(cutoff);
    }
}
