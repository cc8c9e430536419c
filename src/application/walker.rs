//! Recursive depth-first processing of a brick tree.

use tracing::{instrument, trace};

use crate::application::counter::TypeCounter;
use crate::application::store::{BrickStore, ProcessedBrick};
use crate::application::title_tag::build_parent_path;
use crate::domain::{Brick, BrickRepository, BrickType, ChildOrdering, DomainResult};

/// Parameters shared by every level of one traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkParams {
    /// Type of the brick the indentation is measured from
    pub root_type: BrickType,
    /// Depth of the starting brick relative to its thesis
    pub root_level_offset: usize,
    /// Safety bound on recursion depth; deeper levels are silently dropped
    pub max_level: usize,
}

pub struct TreeWalker<'a, R: BrickRepository + ?Sized> {
    repo: &'a R,
    store: &'a mut BrickStore,
}

impl<'a, R: BrickRepository + ?Sized> TreeWalker<'a, R> {
    pub fn new(repo: &'a R, store: &'a mut BrickStore) -> Self {
        Self { repo, store }
    }

    /// Process `brick` and everything below it down to `params.max_level`.
    ///
    /// Returns the processed bricks in depth-first pre-order: `brick` first,
    /// then each child subtree in display order. Every visited brick is also
    /// recorded in the store, replacing results of earlier passes.
    #[instrument(level = "trace", skip(self, brick), fields(id = brick.id))]
    pub fn walk(
        &mut self,
        brick: &Brick,
        params: WalkParams,
        current_level: usize,
    ) -> DomainResult<Vec<ProcessedBrick>> {
        if current_level > params.max_level {
            return Ok(Vec::new());
        }

        // Chronological pass: fixes the typed index of every child,
        // independent of the display order used for recursion below.
        let mut child_type_counter = TypeCounter::new();
        for child in self.repo.children(brick.id, ChildOrdering::Chronological) {
            let typed_idx = child_type_counter.increment(child.brick_type);
            self.store.set_typed_idx(child.id, typed_idx);
        }
        self.store
            .set_child_type_counter(brick.id, child_type_counter.clone());

        let indentation = indentation(params.root_type, current_level);
        let parent_path = build_parent_path(self.repo, self.store, brick)?;
        let typed_idx = match brick.parent {
            Some(_) => self.store.typed_idx_or_default(brick.id),
            None => 1,
        };

        let processed = ProcessedBrick {
            brick: brick.clone(),
            relative_level: current_level,
            absolute_level: current_level + params.root_level_offset,
            indentation,
            typed_idx,
            child_type_counter,
            template: brick.brick_type.template(),
            title_tag: parent_path.title_tag(),
            parent_path,
        };
        trace!(
            "walk: {} level {} tag {}",
            brick,
            current_level,
            processed.title_tag
        );
        self.store.record(processed.clone());

        let mut res = vec![processed];
        let repo = self.repo;
        for child in repo.children(brick.id, ChildOrdering::Display) {
            res.extend(self.walk(child, params, current_level + 1)?);
        }
        Ok(res)
    }
}

/// Left margin of a brick at `current_level`.
///
/// Thesis-rooted views suppress one level because the thesis itself takes
/// the top slot.
pub fn indentation(root_type: BrickType, current_level: usize) -> usize {
    if root_type == BrickType::Thesis {
        current_level.saturating_sub(1)
    } else {
        current_level
    }
}
