//! Query execution against a built filter index.
//!
//! - [`pattern`] - Validated query buffers
//! - [`engine`] - Six-pair probing of the index
//! - [`merger`] - Sorting and deduplication of candidate positions

pub mod engine;
pub mod merger;
pub mod pattern;

pub use engine::{Candidates, QueryEngine};
pub use merger::{PositionSet, ResultMerger};
pub use pattern::Pattern;
