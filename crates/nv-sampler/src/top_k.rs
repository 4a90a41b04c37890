use crate::distribution::ScoredItem;
use crate::truncation::Truncator;

/// Keeps only the `k` highest-probability items, discarding the rest.
///
/// `k == 0` keeps nothing; `k` at or beyond the list length keeps everything.
pub struct TopK {
    k: usize,
}

impl TopK {
    /// Create a new top-k stage that retains the `k` highest-probability items.
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

impl Truncator for TopK {
    fn name(&self) -> &str {
        "top_k"
    }

    fn apply(&self, ranked: &mut Vec<ScoredItem>) {
        ranked.truncate(self.k);
    }
}
