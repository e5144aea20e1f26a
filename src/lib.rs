//! # approx-index - Filtering index for approximate byte matching
//!
//! Given a reference byte sequence, `approx-index` precomputes a structure
//! that answers: "which windows of length `L` differ from this query in at
//! most two bytes?". It is a filter: no true match is ever missed, but some
//! reported positions may be further away and need an exact check.
//!
//! ## Architecture
//!
//! - [`index`] - Reference loading and index construction
//! - [`query`] - Query validation, probing and result merging
//! - [`output`] - Result formatting (plain, JSON, window dumps)
//! - [`utils`] - Hashing, block partitioning, byte rendering
//! - [`error`] - Error types and exit codes
//!
//! ## Quick Start
//!
//! ```
//! use approx_index::index::{FilterIndexBuilder, IndexConfig, QueryLimits};
//! use approx_index::query::{Pattern, QueryEngine};
//!
//! let reference = b"AAAABBBBCCCCDDDDAAAABBBBCCCCDDDD";
//! let index = FilterIndexBuilder::new(IndexConfig::new(16))
//!     .build(reference)
//!     .unwrap();
//!
//! let pattern = Pattern::new(b"AAAABBXXCCCCDDDD".to_vec(), &QueryLimits::default()).unwrap();
//! let positions = QueryEngine::new(&index).query(&pattern).unwrap();
//! assert_eq!(positions.as_slice(), &[0, 16]);
//! ```
//!
//! ## How it works
//!
//! Each window of `4B` bytes is split into four blocks of `B` bytes. Two
//! mismatches can touch at most two blocks, so at least one of the six block
//! pairs is identical between the query and any window within distance 2.
//! Every window's six pair qgrams are indexed; a query probes its own six
//! qgrams and unions the hits.

pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod utils;

pub use error::{ErrorKind, IndexError, Result};
