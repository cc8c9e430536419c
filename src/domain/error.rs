//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::brick::{BrickId, BrickType};

/// Domain errors represent violated tree invariants or corrupted input data.
/// They are not transient: retrying the same operation reproduces them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("brick not found: {0}")]
    UnknownBrick(BrickId),

    #[error("brick {id} references missing parent {parent}")]
    UnknownParent { id: BrickId, parent: BrickId },

    #[error("brick already exists: {0}")]
    DuplicateBrick(BrickId),

    #[error("brick {id} of type {brick_type} violates the root invariant: {message}")]
    RootInvariant {
        id: BrickId,
        brick_type: BrickType,
        message: String,
    },

    #[error("cycle detected in parent chain at brick: {0}")]
    CycleDetected(BrickId),

    #[error("unknown brick type: {0}")]
    UnknownBrickType(String),
}
