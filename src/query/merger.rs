use crate::index::types::Position;
use serde::Serialize;

/// Strictly ascending, duplicate-free set of positions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PositionSet(Vec<Position>);

impl PositionSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.0.iter()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.0.binary_search(&position).is_ok()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Position> {
        self.0
    }
}

impl<'a> IntoIterator for &'a PositionSet {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Turns the unioned per-pair candidates into a [`PositionSet`]
pub struct ResultMerger;

impl ResultMerger {
    /// Sort ascending and drop adjacent duplicates
    pub fn merge(mut candidates: Vec<Position>) -> PositionSet {
        candidates.sort_unstable();
        candidates.dedup();
        PositionSet(candidates)
    }
}

impl FromIterator<Position> for PositionSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        ResultMerger::merge(iter.into_iter().collect())
    }
}
