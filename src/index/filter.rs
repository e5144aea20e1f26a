use crate::index::types::{BlockPair, IndexEntry, Position, NUM_BLOCKS};
use crate::utils::{selector_hash, signature_hash};

/// A built, read-only qgram filter index.
///
/// Holds one bucket per selector hash value. Each bucket is the ordered list
/// of entries whose qgram hashed there; entry order inside a bucket carries
/// no meaning.
#[derive(Debug)]
pub struct FilterIndex {
    buckets: Vec<Vec<IndexEntry>>,
    window_len: usize,
    reference_len: usize,
    entry_count: usize,
}

impl FilterIndex {
    pub(crate) fn from_parts(
        buckets: Vec<Vec<IndexEntry>>,
        window_len: usize,
        reference_len: usize,
    ) -> Self {
        let entry_count = buckets.iter().map(Vec::len).sum();
        Self {
            buckets,
            window_len,
            reference_len,
            entry_count,
        }
    }

    /// Window length `L` this index answers queries for
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Block length `B = L / 4`
    pub fn block_len(&self) -> usize {
        self.window_len / NUM_BLOCKS
    }

    /// Length of the indexed reference text
    pub fn reference_len(&self) -> usize {
        self.reference_len
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of entries (`6 * anchors`)
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Entries stored in bucket `idx`
    pub fn bucket(&self, idx: usize) -> &[IndexEntry] {
        self.buckets.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn buckets(&self) -> impl Iterator<Item = &[IndexEntry]> {
        self.buckets.iter().map(Vec::as_slice)
    }

    /// Positions of every entry built from `pair` whose qgram equals `qgram`
    pub fn probe<'a>(
        &'a self,
        qgram: &'a [u8],
        pair: BlockPair,
    ) -> impl Iterator<Item = Position> + 'a {
        let capacity = self.bucket_count();
        let (bucket, signature) = if capacity == 0 {
            (&[][..], 0)
        } else {
            (
                self.bucket(selector_hash(qgram, capacity)),
                signature_hash(qgram, capacity),
            )
        };
        bucket
            .iter()
            .filter(move |entry| entry.matches(signature, pair, qgram))
            .map(|entry| entry.position)
    }

    /// Approximate memory footprint in bytes
    pub fn memory_usage(&self) -> usize {
        let table = self.buckets.capacity() * std::mem::size_of::<Vec<IndexEntry>>();
        let entries: usize = self
            .buckets
            .iter()
            .flat_map(|b| b.iter())
            .map(IndexEntry::memory_usage)
            .sum();
        table + entries + std::mem::size_of::<Self>()
    }
}
