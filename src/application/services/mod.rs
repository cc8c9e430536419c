//! Application services

pub mod tree;

pub use tree::{BrickTree, ThesisSummary, TreeService, DEFAULT_MAX_LEVEL};
