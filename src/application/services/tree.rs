//! Tree service
//!
//! Entry points used by the presentation layer: render a brick with its
//! subtree, prepare a single brick for the new/edit forms, list theses.

use std::sync::Arc;

use tracing::debug;

use crate::application::root::find_root;
use crate::application::store::{BrickStore, ProcessedBrick};
use crate::application::walker::{TreeWalker, WalkParams};
use crate::application::ApplicationResult;
use crate::domain::{Brick, BrickId, BrickRepository, BrickType, DomainError};

/// Default safety bound on traversal depth.
pub const DEFAULT_MAX_LEVEL: usize = 20;

/// Output of rendering a brick with its subtree.
#[derive(Debug, Clone)]
pub struct BrickTree {
    /// Thesis at the top of the tree the base brick belongs to
    pub root_id: BrickId,
    /// The brick the view was requested for
    pub base: ProcessedBrick,
    /// `base` followed by its descendants in depth-first pre-order
    pub bricks: Vec<ProcessedBrick>,
}

impl BrickTree {
    /// Number of direct children of the base brick for every type.
    pub fn child_type_counts(&self) -> [(BrickType, usize); 5] {
        self.base.child_type_counter.per_type()
    }
}

/// Entry of the thesis index.
#[derive(Debug, Clone, PartialEq)]
pub struct ThesisSummary {
    pub brick: Brick,
    pub template: &'static str,
    pub title_tag: String,
}

/// Service computing positional metadata for brick trees.
pub struct TreeService {
    repo: Arc<dyn BrickRepository>,
    max_level: usize,
}

impl TreeService {
    /// Create a new tree service.
    pub fn new(repo: Arc<dyn BrickRepository>, max_level: usize) -> Self {
        Self { repo, max_level }
    }

    pub fn repository(&self) -> &dyn BrickRepository {
        self.repo.as_ref()
    }

    /// Render `id` together with its subtree.
    ///
    /// Typed indices and child counts of a brick depend on its parent having
    /// enumerated its children, so the whole tree is first processed from the
    /// thesis down to the level of `id`. The second pass then walks the
    /// subtree of `id`, which is indented relative to `id` itself.
    pub fn render_from_root(&self, id: BrickId) -> ApplicationResult<BrickTree> {
        debug!("render_from_root: id={}", id);
        let repo = self.repo.as_ref();
        let mut store = BrickStore::new();

        let start = repo.get(id).ok_or(DomainError::UnknownBrick(id))?;
        let (root, rp_level) = self.ancestor_pass(&mut store, id)?;

        let bricks = TreeWalker::new(repo, &mut store).walk(
            start,
            WalkParams {
                root_type: start.brick_type,
                root_level_offset: rp_level,
                max_level: self.max_level,
            },
            0,
        )?;
        let base = bricks
            .first()
            .cloned()
            .ok_or(DomainError::UnknownBrick(id))?;

        debug!(
            "render_from_root: {} bricks below thesis {}",
            bricks.len(),
            root
        );
        Ok(BrickTree {
            root_id: root,
            base,
            bricks,
        })
    }

    /// Compute all attributes of a single brick without processing its subtree.
    pub fn prepare_single_node(&self, id: BrickId) -> ApplicationResult<ProcessedBrick> {
        debug!("prepare_single_node: id={}", id);
        let mut store = BrickStore::new();
        self.ancestor_pass(&mut store, id)?;
        Ok(store
            .take_processed(id)
            .ok_or(DomainError::UnknownBrick(id))?)
    }

    /// All theses with their index-page labels.
    pub fn list_theses(&self) -> Vec<ThesisSummary> {
        let theses: Vec<ThesisSummary> = self
            .repo
            .theses()
            .into_iter()
            .map(|brick| ThesisSummary {
                brick: brick.clone(),
                template: brick.brick_type.template(),
                title_tag: format!("{}#{}", brick.brick_type.name(), brick.id),
            })
            .collect();
        debug!("list_theses: found {} theses", theses.len());
        theses
    }

    /// Process the tree of `id` from its thesis down to the level of `id`.
    ///
    /// Returns the thesis id and the depth of `id` below it.
    fn ancestor_pass(
        &self,
        store: &mut BrickStore,
        id: BrickId,
    ) -> ApplicationResult<(BrickId, usize)> {
        let repo = self.repo.as_ref();
        let (root, rp_level) = find_root(repo, id)?;
        TreeWalker::new(repo, store).walk(
            root,
            WalkParams {
                root_type: root.brick_type,
                root_level_offset: 0,
                max_level: rp_level,
            },
            0,
        )?;
        Ok((root.id, rp_level))
    }
}
