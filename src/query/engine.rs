use crate::error::{try_reserve, IndexError, Result};
use crate::index::filter::FilterIndex;
use crate::index::types::{BlockPair, Position, NUM_PAIRS};
use crate::query::merger::{PositionSet, ResultMerger};
use crate::query::pattern::Pattern;
use crate::utils::{pairs, printable, qgram_into};
use rayon::prelude::*;

/// Raw probe output before merging
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    /// Hits of all six probes, concatenated in pair order; may repeat
    pub positions: Vec<Position>,
    /// Hit count of each probe, indexed by [`BlockPair::ordinal`]
    pub per_pair: [usize; NUM_PAIRS],
}

impl Candidates {
    /// Hits contributed by `pair`
    pub fn hits_for(&self, pair: BlockPair) -> usize {
        self.per_pair[pair.ordinal()]
    }

    pub fn merge(self) -> PositionSet {
        ResultMerger::merge(self.positions)
    }
}

/// Runs approximate queries against a built [`FilterIndex`].
///
/// Queries only read the index, so one engine (or many) can serve queries
/// from several threads at once.
pub struct QueryEngine<'a> {
    index: &'a FilterIndex,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a FilterIndex) -> Self {
        Self { index }
    }

    /// Every position whose window may be within Hamming distance 2 of
    /// `pattern`. No true match is ever missing; false positives are
    /// possible and must be verified by the caller.
    pub fn query(&self, pattern: &Pattern) -> Result<PositionSet> {
        Ok(self.candidates(pattern)?.merge())
    }

    /// Probe the index with each of the six pair qgrams of `pattern`
    pub fn candidates(&self, pattern: &Pattern) -> Result<Candidates> {
        if pattern.len() != self.index.window_len() {
            return Err(IndexError::QueryLengthMismatch {
                len: pattern.len(),
                window_len: self.index.window_len(),
            });
        }

        let blocks = pattern.blocks();
        let mut candidates = Candidates::default();
        let mut qgram = Vec::with_capacity(2 * pattern.block_len());

        for &pair in pairs() {
            qgram_into(&blocks, pair, &mut qgram);

            let before = candidates.positions.len();
            for position in self.index.probe(&qgram, pair) {
                try_reserve(&mut candidates.positions, 1, "candidate positions")?;
                candidates.positions.push(position);
            }
            let hits = candidates.positions.len() - before;
            candidates.per_pair[pair.ordinal()] = hits;

            log::debug!(
                "{} {} searching.... {} hits ({} total)",
                pair,
                printable(&qgram),
                hits,
                candidates.positions.len()
            );
        }

        Ok(candidates)
    }

    /// Run independent queries in parallel, returning results in input order
    pub fn query_many(&self, patterns: &[Pattern]) -> Vec<Result<PositionSet>> {
        patterns.par_iter().map(|p| self.query(p)).collect()
    }
}
