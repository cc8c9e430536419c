//! Content repository boundary consumed by the tree engine

use crate::domain::brick::{Brick, BrickId, ChildOrdering};

/// Read access to the bricks of one or more argument trees.
///
/// Implementations must hand out a strict tree: every non-thesis brick has an
/// existing parent and no parent chain loops back on itself.
pub trait BrickRepository: Send + Sync {
    /// Look up a single brick.
    fn get(&self, id: BrickId) -> Option<&Brick>;

    /// Direct children of `parent` in the requested order.
    fn children(&self, parent: BrickId, ordering: ChildOrdering) -> Vec<&Brick>;

    /// All theses (parentless bricks), ordered by id.
    fn theses(&self) -> Vec<&Brick>;
}
