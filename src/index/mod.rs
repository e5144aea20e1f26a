pub mod build;
pub mod filter;
pub mod reference;
pub mod stats;
pub mod types;

pub use build::FilterIndexBuilder;
pub use filter::FilterIndex;
pub use reference::ReferenceText;
pub use stats::IndexStats;
pub use types::*;
