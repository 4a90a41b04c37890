use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::distribution::{compute_distribution, ScoredItem};
use crate::error::{Result, ScoreSetError};

/// A candidate label paired with its unnormalized score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(alias = "word")]
    pub label: String,
    #[serde(alias = "logit")]
    pub raw_score: f64,
}

impl Item {
    pub fn new(label: impl Into<String>, raw_score: f64) -> Self {
        Self {
            label: label.into(),
            raw_score,
        }
    }
}

/// The fixed vocabulary loaded once at startup.
///
/// Labels are unique and every score is finite; both are checked on
/// construction so the softmax never sees NaN or infinities.
#[derive(Debug, Clone)]
pub struct ScoreSet {
    items: Vec<Item>,
    by_label: HashMap<String, usize>,
}

impl ScoreSet {
    /// Build a score set, rejecting duplicate labels and non-finite scores.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        let mut by_label = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if !item.raw_score.is_finite() {
                return Err(ScoreSetError::NonFiniteScore {
                    label: item.label.clone(),
                    score: item.raw_score,
                });
            }
            if by_label.insert(item.label.clone(), i).is_some() {
                return Err(ScoreSetError::DuplicateLabel(item.label.clone()));
            }
        }
        Ok(Self { items, by_label })
    }

    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Result<Self> {
        Self::new(pairs.into_iter().map(|(l, s)| Item::new(l, s)).collect())
    }

    /// Parse a JSON array of `{"label": .., "raw_score": ..}` objects.
    ///
    /// The `word` / `logit` field names are accepted as well.
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Self::new(items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, label: &str) -> Option<&Item> {
        self.by_label.get(label).map(|&i| &self.items[i])
    }

    /// Softmax over the whole vocabulary at the given temperature.
    pub fn distribution(&self, temperature: f64) -> Vec<ScoredItem> {
        compute_distribution(&self.items, temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let set = ScoreSet::from_pairs([("a", 2.0), ("b", 1.0)]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("b").unwrap().raw_score, 1.0);
        assert!(set.get("z").is_none());
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let err = ScoreSet::from_pairs([("a", 2.0), ("a", 1.0)]).unwrap_err();
        assert!(matches!(err, ScoreSetError::DuplicateLabel(ref l) if l == "a"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = ScoreSet::from_pairs([("a", f64::NAN)]).unwrap_err();
        assert!(matches!(err, ScoreSetError::NonFiniteScore { .. }));
        assert!(ScoreSet::from_pairs([("a", f64::INFINITY)]).is_err());
    }

    #[test]
    fn test_from_json_with_word_logit_fields() {
        let json = r#"[{"word": "the", "logit": 3.5}, {"label": "a", "raw_score": 1.25}]"#;
        let set = ScoreSet::from_json(json).unwrap();
        assert_eq!(set.items()[0], Item::new("the", 3.5));
        assert_eq!(set.items()[1], Item::new("a", 1.25));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ScoreSet::from_json("[{\"word\": 1}]").unwrap_err();
        assert!(matches!(err, ScoreSetError::Json(_)));
    }

    #[test]
    fn test_empty_set() {
        let set = ScoreSet::new(Vec::new()).unwrap();
        assert!(set.is_empty());
        assert!(set.distribution(1.0).is_empty());
    }
}
