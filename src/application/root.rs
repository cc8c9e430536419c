//! Locating the thesis at the top of a brick's parent chain.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::{Brick, BrickId, BrickRepository, BrickType, DomainError, DomainResult};

/// Walk parent references upward from `id` until a parentless brick is found.
///
/// Returns that root and the number of upward steps (the absolute depth of
/// `id`). A parent chain that revisits a brick is reported as
/// `CycleDetected` instead of looping forever.
#[instrument(level = "debug", skip(repo))]
pub fn find_root<R>(repo: &R, id: BrickId) -> DomainResult<(&Brick, usize)>
where
    R: BrickRepository + ?Sized,
{
    let mut brick = repo.get(id).ok_or(DomainError::UnknownBrick(id))?;
    let mut visited = HashSet::from([brick.id]);
    let mut level = 0;

    while let Some(parent_id) = brick.parent {
        brick = repo.get(parent_id).ok_or(DomainError::UnknownParent {
            id: brick.id,
            parent: parent_id,
        })?;
        if !visited.insert(brick.id) {
            return Err(DomainError::CycleDetected(brick.id));
        }
        level += 1;
    }

    if brick.brick_type != BrickType::Thesis {
        return Err(DomainError::RootInvariant {
            id: brick.id,
            brick_type: brick.brick_type,
            message: "tree root must be a thesis".to_string(),
        });
    }

    debug!("find_root: brick {} is {} levels below thesis {}", id, level, brick.id);
    Ok((brick, level))
}
