//! Per-call store of transient, computed brick attributes.
//!
//! A fresh [`BrickStore`] is created for every tree API call and dropped when
//! the call returns, so nothing leaks between calls and nothing accumulates.

use std::collections::HashMap;

use crate::application::counter::TypeCounter;
use crate::application::title_tag::ParentPath;
use crate::domain::{Brick, BrickId};

/// A brick together with everything one traversal computed for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedBrick {
    pub brick: Brick,
    /// Depth relative to the brick the traversal started at
    pub relative_level: usize,
    /// Depth relative to the thesis of the tree
    pub absolute_level: usize,
    /// Left margin in levels; see [`ProcessedBrick::indentation_class`]
    pub indentation: usize,
    /// 1-based index among same-type siblings, by creation time
    pub typed_idx: usize,
    /// Direct children of this brick per type
    pub child_type_counter: TypeCounter,
    pub template: &'static str,
    pub parent_path: ParentPath,
    pub title_tag: String,
}

impl ProcessedBrick {
    pub fn id(&self) -> BrickId {
        self.brick.id
    }

    /// CSS class for the left margin, e.g. `ml2`.
    pub fn indentation_class(&self) -> String {
        format!("ml{}", self.indentation)
    }
}

#[derive(Debug, Default)]
pub struct BrickStore {
    typed_idx: HashMap<BrickId, usize>,
    child_type_counters: HashMap<BrickId, TypeCounter>,
    parent_paths: HashMap<BrickId, ParentPath>,
    processed: HashMap<BrickId, ProcessedBrick>,
}

impl BrickStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn typed_idx(&self, id: BrickId) -> Option<usize> {
        self.typed_idx.get(&id).copied()
    }

    pub fn set_typed_idx(&mut self, id: BrickId, idx: usize) {
        self.typed_idx.insert(id, idx);
    }

    /// Typed index of `id`; a brick never enumerated by its parent gets 1.
    pub fn typed_idx_or_default(&mut self, id: BrickId) -> usize {
        *self.typed_idx.entry(id).or_insert(1)
    }

    pub fn child_type_counter(&self, id: BrickId) -> Option<&TypeCounter> {
        self.child_type_counters.get(&id)
    }

    pub fn set_child_type_counter(&mut self, id: BrickId, counter: TypeCounter) {
        self.child_type_counters.insert(id, counter);
    }

    pub fn parent_path(&self, id: BrickId) -> Option<&ParentPath> {
        self.parent_paths.get(&id)
    }

    pub fn set_parent_path(&mut self, id: BrickId, path: ParentPath) {
        self.parent_paths.insert(id, path);
    }

    pub fn processed(&self, id: BrickId) -> Option<&ProcessedBrick> {
        self.processed.get(&id)
    }

    /// Record a visited brick, replacing the entry of an earlier pass.
    pub fn record(&mut self, processed: ProcessedBrick) {
        self.processed.insert(processed.id(), processed);
    }

    pub fn take_processed(&mut self, id: BrickId) -> Option<ProcessedBrick> {
        self.processed.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.processed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }
}
