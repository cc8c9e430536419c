//! Title tags: compact labels encoding a brick's path from its thesis.
//!
//! A tag such as `!1✓2⚡1` reads "thesis 1, its 2nd pro-brick, that one's
//! 1st contra-brick". Each level contributes one [`PathSegment`]; the index is
//! the primary key for the thesis and the typed sibling index below it.
//!
//! Two entry modes exist:
//! - top-down: [`ParentPath::extend`] when the parent's path is at hand
//!   (the normal case inside the tree walker)
//! - bottom-up: [`resolve_parent_path`] when entering at an arbitrary brick;
//!   ancestors are located by walking parent references

use std::collections::HashSet;
use std::fmt;

use tracing::{instrument, trace};

use crate::application::store::BrickStore;
use crate::domain::{Brick, BrickId, BrickRepository, BrickType, DomainError, DomainResult};

/// One level of a brick's ancestor chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSegment {
    pub symbol: char,
    /// Primary key for the thesis, typed sibling index otherwise
    pub index: u64,
    pub id: BrickId,
}

/// Ordered ancestor chain from the thesis down to (and including) a brick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentPath(Vec<PathSegment>);

impl ParentPath {
    /// Path of a thesis. Only parentless theses are valid roots.
    pub fn root(brick: &Brick) -> DomainResult<Self> {
        if brick.parent.is_some() || brick.brick_type != BrickType::Thesis {
            return Err(DomainError::RootInvariant {
                id: brick.id,
                brick_type: brick.brick_type,
                message: "title tag root must be a parentless thesis".to_string(),
            });
        }
        Ok(Self(vec![PathSegment {
            symbol: BrickType::Thesis.symbol(),
            index: brick.id,
            id: brick.id,
        }]))
    }

    /// Path of `brick`, given the path of its parent.
    pub fn extend(&self, brick: &Brick, typed_idx: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment {
            symbol: brick.brick_type.symbol(),
            index: typed_idx as u64,
            id: brick.id,
        });
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// The rendered tag, e.g. `!7✓3`.
    pub fn title_tag(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ParentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "{}{}", segment.symbol, segment.index)?;
        }
        Ok(())
    }
}

/// Compute the path of `brick` top-down if its parent's path is already in the
/// store, bottom-up otherwise. The result is recorded in the store.
pub fn build_parent_path<R>(
    repo: &R,
    store: &mut BrickStore,
    brick: &Brick,
) -> DomainResult<ParentPath>
where
    R: BrickRepository + ?Sized,
{
    let path = match brick.parent {
        None => ParentPath::root(brick)?,
        Some(parent) => match store.parent_path(parent).cloned() {
            Some(parent_path) => {
                let typed_idx = store.typed_idx_or_default(brick.id);
                parent_path.extend(brick, typed_idx)
            }
            None => return resolve_parent_path(repo, store, brick),
        },
    };
    store.set_parent_path(brick.id, path.clone());
    Ok(path)
}

/// Bottom-up mode: walk the ancestors of `brick` up to the first one with a
/// known path (or the thesis), then extend downwards.
///
/// Ancestors without an assigned typed index get index 1.
#[instrument(level = "debug", skip_all, fields(id = brick.id))]
pub fn resolve_parent_path<R>(
    repo: &R,
    store: &mut BrickStore,
    brick: &Brick,
) -> DomainResult<ParentPath>
where
    R: BrickRepository + ?Sized,
{
    let mut chain: Vec<&Brick> = vec![brick];
    let mut seen = HashSet::from([brick.id]);
    let mut current = brick;

    let mut path = loop {
        if current.id != brick.id {
            if let Some(known) = store.parent_path(current.id) {
                let known = known.clone();
                chain.pop();
                break known;
            }
        }
        match current.parent {
            None => {
                let root = ParentPath::root(current)?;
                store.set_parent_path(current.id, root.clone());
                chain.pop();
                break root;
            }
            Some(parent_id) => {
                let parent = repo.get(parent_id).ok_or(DomainError::UnknownParent {
                    id: current.id,
                    parent: parent_id,
                })?;
                if !seen.insert(parent.id) {
                    return Err(DomainError::CycleDetected(parent.id));
                }
                chain.push(parent);
                current = parent;
            }
        }
    };

    trace!("resolve_parent_path: extending {} levels below {}", chain.len(), path);
    while let Some(next) = chain.pop() {
        let typed_idx = store.typed_idx_or_default(next.id);
        path = path.extend(next, typed_idx);
        store.set_parent_path(next.id, path.clone());
    }

    Ok(path)
}
