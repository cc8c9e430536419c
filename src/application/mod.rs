//! Application layer: the brick-tree processing engine and its services
//!
//! This layer orchestrates domain logic and depends only on the repository boundary.

pub mod counter;
pub mod error;
pub mod error_ext;
pub mod root;
pub mod services;
pub mod store;
pub mod title_tag;
pub mod walker;

pub use counter::TypeCounter;
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use root::find_root;
pub use store::{BrickStore, ProcessedBrick};
pub use title_tag::{build_parent_path, resolve_parent_path, ParentPath, PathSegment};
pub use walker::{indentation, TreeWalker, WalkParams};
