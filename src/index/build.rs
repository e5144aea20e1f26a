//! Batch construction of a [`FilterIndex`].
//!
//! Every anchor position `p` in `0..=N-L` contributes six entries, one per
//! block pair. Entries are built in parallel over contiguous anchor shards
//! and then appended to the bucket table in shard order, so the table is
//! identical to one built sequentially.

use crate::error::{try_reserve, IndexError, Result};
use crate::index::filter::FilterIndex;
use crate::index::types::{IndexConfig, IndexEntry, NUM_BLOCKS, NUM_PAIRS};
use crate::utils::progress::{anchor_progress, ProgressBar};
use crate::utils::{
    hex_dump, pairs, partition_at, printable, qgram_into, selector_hash, signature_hash,
};
use rayon::prelude::*;
use std::ops::Range;
use std::time::Instant;

/// Anchors handled per parallel task
const SHARD_ANCHORS: usize = 1 << 14;

/// Anchors indexed between progress bar updates
const PROGRESS_STEP: u64 = 1 << 10;

/// Builds a [`FilterIndex`] from a reference text.
///
/// `build` consumes the builder, so an index is built exactly once.
#[derive(Debug, Clone)]
pub struct FilterIndexBuilder {
    config: IndexConfig,
}

impl FilterIndexBuilder {
    pub fn new(config: IndexConfig) -> Self {
        Self { config }
    }

    /// Index every window of `reference`
    pub fn build(self, reference: &[u8]) -> Result<FilterIndex> {
        self.validate()?;

        let window_len = self.config.window_len;
        let anchors = anchor_count(reference.len(), window_len);
        let expected_entries = anchors.saturating_mul(NUM_PAIRS);
        let capacity = self.bucket_capacity(expected_entries);

        log::debug!(
            "building index: {} bytes, window {}, {} anchors, {} buckets",
            reference.len(),
            window_len,
            anchors,
            capacity
        );
        let start = Instant::now();

        let mut buckets: Vec<Vec<IndexEntry>> = Vec::new();
        try_reserve(&mut buckets, capacity, "bucket table")?;
        buckets.resize_with(capacity, Vec::new);

        let progress = anchor_progress(anchors as u64, self.config.silent);

        let parallel = anchors >= self.config.parallel_threshold
            && self.config.threads.is_none_or(|t| t > 1);

        if parallel {
            self.build_sharded(reference, anchors, capacity, &mut buckets, progress.as_ref())?;
        } else {
            index_anchors(
                reference,
                0..anchors,
                window_len,
                capacity,
                progress.as_ref(),
                |entry| place_entry(&mut buckets, entry),
            )?;
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Index complete");
        }

        let index = FilterIndex::from_parts(buckets, window_len, reference.len());
        log::debug!(
            "built {} entries in {:?}",
            index.entry_count(),
            start.elapsed()
        );
        Ok(index)
    }

    fn validate(&self) -> Result<()> {
        let len = self.config.window_len;
        if len == 0 || len % NUM_BLOCKS != 0 {
            return Err(IndexError::QueryLengthNotMultipleOfFour { len });
        }
        if self.config.buckets == Some(0) {
            return Err(IndexError::InvalidConfig("bucket count must be positive".into()));
        }
        if self.config.target_chain_len == 0 {
            return Err(IndexError::InvalidConfig(
                "target chain length must be positive".into(),
            ));
        }
        if self.config.threads == Some(0) {
            return Err(IndexError::InvalidConfig("thread count must be positive".into()));
        }
        Ok(())
    }

    /// Explicit bucket count, or the smallest prime covering the expected
    /// entries at the target chain length
    fn bucket_capacity(&self, expected_entries: usize) -> usize {
        match self.config.buckets {
            Some(n) => n,
            None => next_prime((expected_entries / self.config.target_chain_len).max(1)),
        }
    }

    fn build_sharded(
        &self,
        reference: &[u8],
        anchors: usize,
        capacity: usize,
        buckets: &mut [Vec<IndexEntry>],
        progress: Option<&ProgressBar>,
    ) -> Result<()> {
        let window_len = self.config.window_len;
        let shards: Vec<Range<usize>> = (0..anchors)
            .step_by(SHARD_ANCHORS)
            .map(|s| s..(s + SHARD_ANCHORS).min(anchors))
            .collect();

        let run = || -> Result<Vec<Vec<IndexEntry>>> {
            shards
                .into_par_iter()
                .map(|range| -> Result<Vec<IndexEntry>> {
                    let mut entries = Vec::new();
                    try_reserve(&mut entries, range.len() * NUM_PAIRS, "index entries")?;
                    index_anchors(reference, range, window_len, capacity, progress, |entry| {
                        entries.push(entry);
                        Ok(())
                    })?;
                    Ok(entries)
                })
                .collect()
        };

        let shard_entries = match self.config.threads {
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| IndexError::InvalidConfig(format!("thread pool: {}", e)))?
                .install(run)?,
            None => run()?,
        };

        log::debug!("merging {} shards", shard_entries.len());

        // Size every bucket exactly before moving entries in.
        let mut counts: Vec<usize> = Vec::new();
        try_reserve(&mut counts, capacity, "bucket sizes")?;
        counts.resize(capacity, 0);
        for entry in shard_entries.iter().flatten() {
            counts[entry.selector] += 1;
        }
        for (bucket, &count) in buckets.iter_mut().zip(&counts) {
            if count > 0 {
                bucket
                    .try_reserve_exact(count)
                    .map_err(|_| IndexError::ResourceExhausted {
                        what: "bucket",
                        requested: count,
                    })?;
            }
        }

        for entry in shard_entries.into_iter().flatten() {
            place_entry(buckets, entry)?;
        }
        Ok(())
    }
}

/// Number of windows of `window_len` bytes in a text of `len` bytes
fn anchor_count(len: usize, window_len: usize) -> usize {
    if window_len == 0 || len < window_len {
        0
    } else {
        len - window_len + 1
    }
}

/// Build the six entries of each anchor in `range`, in anchor then pair
/// order, handing each to `emit`
fn index_anchors(
    reference: &[u8],
    range: Range<usize>,
    window_len: usize,
    capacity: usize,
    progress: Option<&ProgressBar>,
    mut emit: impl FnMut(IndexEntry) -> Result<()>,
) -> Result<()> {
    let block_len = window_len / NUM_BLOCKS;
    let qgram_len = 2 * block_len;

    let mut buf = Vec::with_capacity(qgram_len);
    let mut pending = 0u64;
    for p in range {
        let blocks = partition_at(reference, p, block_len);

        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{} - check: {}", p, printable(&reference[p..p + window_len]));
        }

        for &pair in pairs() {
            qgram_into(&blocks, pair, &mut buf);

            let mut qgram = Vec::new();
            try_reserve(&mut qgram, qgram_len, "qgram")?;
            qgram.extend_from_slice(&buf);

            log::trace!("  {} {} [{}]", pair, printable(&qgram), hex_dump(&qgram));

            emit(IndexEntry {
                position: p,
                selector: selector_hash(&qgram, capacity),
                signature: signature_hash(&qgram, capacity),
                pair,
                qgram: qgram.into_boxed_slice(),
            })?;
        }

        pending += 1;
        if pending == PROGRESS_STEP {
            if let Some(pb) = progress {
                pb.inc(pending);
            }
            pending = 0;
        }
    }

    if let Some(pb) = progress {
        pb.inc(pending);
    }
    Ok(())
}

fn place_entry(buckets: &mut [Vec<IndexEntry>], entry: IndexEntry) -> Result<()> {
    let bucket = &mut buckets[entry.selector];
    try_reserve(bucket, 1, "bucket")?;
    bucket.push(entry);
    Ok(())
}

/// Smallest prime `>= n`
pub fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
