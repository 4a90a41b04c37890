use std::collections::HashMap;

use crate::geometry::Point;

/// Last known position of every item that was visible in the latest cycle.
///
/// A state is always built whole from one cycle's output and replaces the
/// previous one; entries are never merged across cycles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutState {
    positions: HashMap<String, Point>,
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<Point> {
        self.positions.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.positions.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, Point)> for LayoutState {
    fn from_iter<I: IntoIterator<Item = (S, Point)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().map(|(l, p)| (l.into(), p)).collect(),
        }
    }
}
