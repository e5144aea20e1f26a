use serde::{Deserialize, Serialize};

/// A 0-based byte offset into the reference text
pub type Position = usize;

/// Number of blocks a window is partitioned into
pub const NUM_BLOCKS: usize = 4;

/// Number of distinct block pairs
pub const NUM_PAIRS: usize = 6;

/// An unordered pair of distinct block indices, stored with `first < second`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPair {
    first: u8,
    second: u8,
}

impl BlockPair {
    /// All six pairs in lexicographic order
    pub const ALL: [BlockPair; NUM_PAIRS] = [
        BlockPair { first: 0, second: 1 },
        BlockPair { first: 0, second: 2 },
        BlockPair { first: 0, second: 3 },
        BlockPair { first: 1, second: 2 },
        BlockPair { first: 1, second: 3 },
        BlockPair { first: 2, second: 3 },
    ];

    /// Returns `None` unless `first < second < 4`
    pub fn new(first: usize, second: usize) -> Option<Self> {
        if first < second && second < NUM_BLOCKS {
            Some(Self {
                first: first as u8,
                second: second as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn first(&self) -> usize {
        self.first as usize
    }

    #[inline]
    pub fn second(&self) -> usize {
        self.second as usize
    }

    /// Index of this pair within [`BlockPair::ALL`]
    pub fn ordinal(&self) -> usize {
        match (self.first, self.second) {
            (0, 1) => 0,
            (0, 2) => 1,
            (0, 3) => 2,
            (1, 2) => 3,
            (1, 3) => 4,
            _ => 5,
        }
    }
}

impl std::fmt::Display for BlockPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.first, self.second)
    }
}

/// One indexed qgram: the pair of blocks it was built from, where it came
/// from, and an owned copy of its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub position: Position,
    pub selector: usize,
    pub signature: u64,
    pub pair: BlockPair,
    pub qgram: Box<[u8]>,
}

impl IndexEntry {
    /// Whether this entry is an exact hit for `qgram` built from `pair`.
    /// The signature is compared first since it is the cheapest check.
    #[inline]
    pub fn matches(&self, signature: u64, pair: BlockPair, qgram: &[u8]) -> bool {
        self.signature == signature && self.pair == pair && *self.qgram == *qgram
    }

    /// Approximate heap + inline size in bytes
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.qgram.len()
    }
}

/// Configuration for building a filter index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Window (query) length `L`; must be a positive multiple of 4
    pub window_len: usize,
    /// Explicit bucket count; auto-sized from the entry count when `None`
    pub buckets: Option<usize>,
    /// Expected entries per bucket when auto-sizing
    pub target_chain_len: usize,
    /// Build threads; `None` uses the rayon default
    pub threads: Option<usize>,
    /// References shorter than this are indexed sequentially
    pub parallel_threshold: usize,
    /// Suppress progress output
    pub silent: bool,
}

impl IndexConfig {
    pub fn new(window_len: usize) -> Self {
        Self {
            window_len,
            ..Self::default()
        }
    }

    pub fn with_buckets(mut self, buckets: usize) -> Self {
        self.buckets = Some(buckets);
        self
    }

    pub fn with_target_chain_len(mut self, target: usize) -> Self {
        self.target_chain_len = target;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Block length `B = L / 4`
    pub fn block_len(&self) -> usize {
        self.window_len / NUM_BLOCKS
    }

    /// Qgram length `2B`
    pub fn qgram_len(&self) -> usize {
        2 * self.block_len()
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            window_len: 16,
            buckets: None,
            target_chain_len: 1,
            threads: None,
            parallel_threshold: 1 << 16,
            silent: true,
        }
    }
}

/// Length bounds applied to incoming queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLimits {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            min_len: NUM_BLOCKS,
            max_len: 1024,
        }
    }
}
