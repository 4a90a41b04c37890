use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::distribution::ScoredItem;
use crate::top_k::TopK;
use crate::top_p::TopP;

/// A scored item that survived truncation, with its 0-based rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleItem {
    pub rank: usize,
    pub index: usize,
    pub label: String,
    pub raw_score: f64,
    pub probability: f64,
}

/// Result of running a [`TruncationChain`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Truncation {
    /// Survivors in descending-probability order.
    pub visible: Vec<VisibleItem>,
    /// Probability mass covered by `visible`.
    pub realized_cumulative_mass: f64,
}

/// A truncation policy that filters a rank-ordered candidate list.
pub trait Truncator: Send + Sync {
    /// Returns the name of this policy.
    fn name(&self) -> &str;

    /// Filter candidates in-place. `ranked` is sorted by descending
    /// probability and implementations must keep a prefix of it.
    fn apply(&self, ranked: &mut Vec<ScoredItem>);
}

/// Descending probability, then ascending position in the score set.
fn rank_order(a: &ScoredItem, b: &ScoredItem) -> Ordering {
    b.probability
        .total_cmp(&a.probability)
        .then_with(|| a.index.cmp(&b.index))
}

/// Composes truncation policies into a pipeline.
pub struct TruncationChain {
    stages: Vec<Box<dyn Truncator>>,
}

impl TruncationChain {
    /// Create a new empty chain. An empty chain keeps everything.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// The standard pipeline: top-k first, then nucleus over what is left.
    pub fn top_k_top_p(top_k: usize, top_p: f64) -> Self {
        Self::new()
            .with(Box::new(TopK::new(top_k)))
            .with(Box::new(TopP::new(top_p)))
    }

    /// Add a stage to the end of the chain. Returns self for builder-style usage.
    pub fn with(mut self, stage: Box<dyn Truncator>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Rank the distribution, run each stage in order, and number the survivors.
    pub fn run(&self, scored: &[ScoredItem]) -> Truncation {
        let mut ranked = scored.to_vec();
        ranked.sort_by(rank_order);

        for stage in &self.stages {
            let before = ranked.len();
            stage.apply(&mut ranked);
            debug_assert!(ranked.len() <= before, "{} grew the candidate list", stage.name());
        }

        let realized_cumulative_mass = ranked.iter().map(|s| s.probability).sum();
        let visible: Vec<VisibleItem> = ranked
            .into_iter()
            .enumerate()
            .map(|(rank, s)| VisibleItem {
                rank,
                index: s.index,
                label: s.label,
                raw_score: s.raw_score,
                probability: s.probability,
            })
            .collect();

        debug!(
            "truncation kept {} of {} items, mass {:.4}",
            visible.len(),
            scored.len(),
            realized_cumulative_mass
        );

        Truncation {
            visible,
            realized_cumulative_mass,
        }
    }
}

impl Default for TruncationChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply top-k then top-p to a distribution.
pub fn truncate(scored: &[ScoredItem], top_k: usize, top_p: f64) -> Truncation {
    TruncationChain::top_k_top_p(top_k, top_p).run(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::compute_distribution;
    use crate::score::ScoreSet;
    use approx::assert_abs_diff_eq;

    fn abc() -> Vec<ScoredItem> {
        ScoreSet::from_pairs([("a", 2.0), ("b", 1.0), ("c", 0.1)])
            .unwrap()
            .distribution(1.0)
    }

    fn labels(t: &Truncation) -> Vec<&str> {
        t.visible.iter().map(|v| v.label.as_str()).collect()
    }

    fn vocabulary() -> Vec<ScoredItem> {
        let set = ScoreSet::from_pairs([
            ("the", 3.1),
            ("a", 2.7),
            ("one", 0.4),
            ("this", 2.7),
            ("my", -0.5),
            ("our", 1.9),
            ("that", 0.0),
            ("some", 1.2),
        ])
        .unwrap();
        set.distribution(0.9)
    }

    #[test]
    fn test_top_k_two_full_nucleus() {
        let t = truncate(&abc(), 2, 1.0);
        assert_eq!(labels(&t), vec!["a", "b"]);
        assert_abs_diff_eq!(t.realized_cumulative_mass, 0.901, epsilon = 1e-3);
    }

    #[test]
    fn test_top_k_one_ignores_top_p() {
        for &p in &[0.0, 0.3, 0.9, 1.0] {
            let t = truncate(&abc(), 1, p);
            assert_eq!(labels(&t), vec!["a"]);
            assert_abs_diff_eq!(t.realized_cumulative_mass, t.visible[0].probability);
            assert_abs_diff_eq!(t.realized_cumulative_mass, 0.659, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_full_vocabulary_keeps_everything() {
        let dist = vocabulary();
        let t = truncate(&dist, dist.len(), 1.0);
        assert_eq!(t.visible.len(), dist.len());
        assert_abs_diff_eq!(t.realized_cumulative_mass, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_k_beyond_length_saturates() {
        let t = truncate(&abc(), 1_000, 1.0);
        assert_eq!(labels(&t), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_k_zero_is_empty() {
        let t = truncate(&abc(), 0, 0.5);
        assert!(t.visible.is_empty());
        assert_eq!(t.realized_cumulative_mass, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let t = truncate(&[], 5, 0.5);
        assert!(t.visible.is_empty());
        assert_eq!(t.realized_cumulative_mass, 0.0);
    }

    #[test]
    fn test_nucleus_includes_crossing_item() {
        // a = 0.659 < 0.7, a + b = 0.901 crosses it.
        let t = truncate(&abc(), 3, 0.7);
        assert_eq!(labels(&t), vec!["a", "b"]);
        assert_abs_diff_eq!(t.realized_cumulative_mass, 0.901, epsilon = 1e-3);
    }

    #[test]
    fn test_at_least_one_for_any_p() {
        let dist = vocabulary();
        for &p in &[0.0, 1e-12, 0.1, 0.5, 0.99, 1.0, 3.0] {
            for k in 1..=dist.len() {
                let t = truncate(&dist, k, p);
                assert!(!t.visible.is_empty(), "k={k} p={p}");
                assert!(t.visible.len() <= k);
            }
        }
    }

    #[test]
    fn test_result_is_ranking_prefix() {
        let dist = vocabulary();
        let full = truncate(&dist, dist.len(), 1.0);
        for &p in &[0.2, 0.5, 0.8, 0.95] {
            for k in 0..=dist.len() {
                let t = truncate(&dist, k, p);
                assert_eq!(t.visible, full.visible[..t.visible.len()].to_vec());
            }
        }
    }

    #[test]
    fn test_ranks_are_sequential() {
        let t = truncate(&vocabulary(), 5, 1.0);
        for (i, v) in t.visible.iter().enumerate() {
            assert_eq!(v.rank, i);
        }
        assert!(t
            .visible
            .windows(2)
            .all(|w| w[0].probability >= w[1].probability));
    }

    #[test]
    fn test_ties_follow_input_order() {
        let t = truncate(&vocabulary(), 3, 1.0);
        // "a" and "this" share a score; "a" comes first in the vocabulary.
        assert_eq!(labels(&t), vec!["the", "a", "this"]);

        let reversed: Vec<ScoredItem> = vocabulary().into_iter().rev().collect();
        let t = truncate(&reversed, 3, 1.0);
        assert_eq!(labels(&t), vec!["the", "a", "this"]);
    }

    #[test]
    fn test_all_equal_scores() {
        let set = ScoreSet::from_pairs([("x", 1.0), ("y", 1.0), ("z", 1.0), ("w", 1.0)]).unwrap();
        let dist = compute_distribution(set.items(), 1.0);
        let t = truncate(&dist, 4, 0.5);
        assert_eq!(labels(&t), vec!["x", "y"]);
        assert_abs_diff_eq!(t.realized_cumulative_mass, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_chain_keeps_all_ranked() {
        let chain = TruncationChain::new();
        assert!(chain.stage_names().is_empty());
        let t = chain.run(&abc());
        assert_eq!(labels(&t), vec!["a", "b", "c"]);
        assert_eq!(
            TruncationChain::top_k_top_p(2, 0.5).stage_names(),
            vec!["top_k", "top_p"]
        );
    }
}
