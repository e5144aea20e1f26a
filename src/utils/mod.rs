//! Utility functions shared by the index and the query engine.
//!
//! ## Modules
//!
//! - [`hash`] - Selector and signature hashes over qgram bytes
//! - [`partition`] - Four-block partitioning and pair qgram assembly
//! - [`printable`] - Printable and hex renderings of raw bytes
//! - [`progress`] - Build progress bars
//!
//! ## Key Functions
//!
//! ```
//! use approx_index::index::BlockPair;
//! use approx_index::utils::{partition, qgram, selector_hash};
//!
//! let blocks = partition(b"AAAABBBBCCCCDDDD").unwrap();
//! let key = qgram(&blocks, BlockPair::ALL[1]);
//! assert_eq!(key, b"AAAACCCC");
//! assert!(selector_hash(&key, 101) < 101);
//! ```

pub mod hash;
pub mod partition;
pub mod printable;
pub mod progress;

pub use hash::*;
pub use partition::*;
pub use printable::*;
