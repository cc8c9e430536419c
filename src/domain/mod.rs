//! Domain layer: bricks, their arena and the repository boundary
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod brick;
pub mod error;
pub mod repository;

pub use arena::{BrickArena, BrickNode, DomainResult};
pub use brick::{Brick, BrickId, BrickType, ChildOrdering};
pub use error::DomainError;
pub use repository::BrickRepository;
