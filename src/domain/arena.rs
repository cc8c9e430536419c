//! Arena-backed in-memory brick repository.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use generational_arena::{Arena, Index};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::brick::{Brick, BrickId, BrickType, ChildOrdering};
use crate::domain::error::DomainError;
use crate::domain::repository::BrickRepository;

/// Result type for arena operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct BrickNode {
    /// The stored brick
    pub brick: Brick,
    /// Index of parent node in the arena, None for theses
    pub parent: Option<Index>,
    /// Indices of child nodes in insertion order
    pub children: Vec<Index>,
}

/// Arena-based forest of argument trees.
///
/// Uses a generational arena for memory-safe node references and O(1) lookups.
/// Parents must be inserted before their children, so the stored parent
/// relation is always a strict tree.
#[derive(Debug, Default)]
pub struct BrickArena {
    arena: Arena<BrickNode>,
    ids: HashMap<BrickId, Index>,
    roots: Vec<Index>,
}

impl BrickArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an arena from bricks given in any order.
    ///
    /// Bricks are inserted parent-first. A brick whose parent never shows up
    /// yields `UnknownParent`; a group of bricks that only reference each
    /// other yields `CycleDetected`.
    #[instrument(level = "debug", skip(bricks))]
    pub fn from_bricks(bricks: impl IntoIterator<Item = Brick>) -> DomainResult<Self> {
        let mut arena = Self::new();
        let mut pending: Vec<Brick> = bricks.into_iter().sorted_by_key(|b| b.id).collect();

        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();
            for brick in pending {
                match brick.parent {
                    Some(parent) if !arena.contains(parent) => deferred.push(brick),
                    _ => {
                        arena.insert(brick)?;
                    }
                }
            }

            if deferred.len() == before {
                let waiting: HashSet<BrickId> = deferred.iter().map(|b| b.id).collect();
                let dangling = deferred.iter().find_map(|b| match b.parent {
                    Some(parent) if !waiting.contains(&parent) => Some((b.id, parent)),
                    _ => None,
                });
                return Err(match dangling {
                    Some((id, parent)) => DomainError::UnknownParent { id, parent },
                    None => DomainError::CycleDetected(deferred[0].id),
                });
            }
            pending = deferred;
        }

        debug!("from_bricks: {} bricks in {} trees", arena.len(), arena.roots.len());
        Ok(arena)
    }

    /// Insert a brick below an already stored parent.
    #[instrument(level = "trace", skip(self, brick), fields(id = brick.id))]
    pub fn insert(&mut self, brick: Brick) -> DomainResult<Index> {
        if self.ids.contains_key(&brick.id) {
            return Err(DomainError::DuplicateBrick(brick.id));
        }

        let parent_idx = match (brick.brick_type, brick.parent) {
            (BrickType::Thesis, None) => None,
            (BrickType::Thesis, Some(_)) => {
                return Err(DomainError::RootInvariant {
                    id: brick.id,
                    brick_type: brick.brick_type,
                    message: "a thesis must not have a parent".to_string(),
                })
            }
            (_, None) => {
                return Err(DomainError::RootInvariant {
                    id: brick.id,
                    brick_type: brick.brick_type,
                    message: "only a thesis may be without parent".to_string(),
                })
            }
            (_, Some(parent)) => Some(*self.ids.get(&parent).ok_or(DomainError::UnknownParent {
                id: brick.id,
                parent,
            })?),
        };

        let id = brick.id;
        let node_idx = self.arena.insert(BrickNode {
            brick,
            parent: parent_idx,
            children: Vec::new(),
        });
        self.ids.insert(id, node_idx);

        match parent_idx.and_then(|p| self.arena.get_mut(p)) {
            Some(parent) => parent.children.push(node_idx),
            None => self.roots.push(node_idx),
        }

        Ok(node_idx)
    }

    pub fn contains(&self, id: BrickId) -> bool {
        self.ids.contains_key(&id)
    }

    pub fn get_node(&self, idx: Index) -> Option<&BrickNode> {
        self.arena.get(idx)
    }

    pub fn index_of(&self, id: BrickId) -> Option<Index> {
        self.ids.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Next free primary key.
    pub fn next_id(&self) -> BrickId {
        self.ids.keys().max().map_or(1, |max| max + 1)
    }

    /// Pre-order iteration over all trees, theses in insertion order.
    pub fn iter(&self) -> BrickIterator<'_> {
        BrickIterator::new(self)
    }

    /// Number of levels of the deepest tree (0 for an empty arena).
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Create a new brick from its type code.
    ///
    /// Code `th` creates a thesis and must come without parent; every other
    /// code needs an existing parent.
    #[instrument(level = "debug", skip(self, title, content))]
    pub fn add_brick(
        &mut self,
        parent: Option<BrickId>,
        type_code: &str,
        title: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<BrickId> {
        let brick_type = BrickType::from_code(type_code)?;
        let id = self.next_id();
        self.insert(Brick {
            id,
            brick_type,
            parent,
            title: title.to_string(),
            content: content.to_string(),
            cached_avg_vote: 0.0,
            creation_datetime: now,
            update_datetime: now,
        })?;
        debug!("add_brick: created {} brick {}", brick_type, id);
        Ok(id)
    }

    /// Replace title and/or content; bumps the update time, keeps the creation time.
    #[instrument(level = "debug", skip(self, title, content))]
    pub fn edit_brick(
        &mut self,
        id: BrickId,
        title: Option<&str>,
        content: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<&Brick> {
        let idx = self.index_of(id).ok_or(DomainError::UnknownBrick(id))?;
        let node = self
            .arena
            .get_mut(idx)
            .ok_or(DomainError::UnknownBrick(id))?;
        if let Some(title) = title {
            node.brick.title = title.to_string();
        }
        if let Some(content) = content {
            node.brick.content = content.to_string();
        }
        node.brick.update_datetime = now;
        Ok(&node.brick)
    }
}

impl BrickRepository for BrickArena {
    fn get(&self, id: BrickId) -> Option<&Brick> {
        self.index_of(id)
            .and_then(|idx| self.get_node(idx))
            .map(|node| &node.brick)
    }

    fn children(&self, parent: BrickId, ordering: ChildOrdering) -> Vec<&Brick> {
        let Some(node) = self.index_of(parent).and_then(|idx| self.get_node(idx)) else {
            return Vec::new();
        };
        node.children
            .iter()
            .filter_map(|&child| self.get_node(child))
            .map(|child| &child.brick)
            .sorted_by(|a, b| ordering.compare(a, b))
            .collect()
    }

    fn theses(&self) -> Vec<&Brick> {
        self.roots
            .iter()
            .filter_map(|&root| self.get_node(root))
            .map(|node| &node.brick)
            .sorted_by_key(|brick| brick.id)
            .collect()
    }
}

pub struct BrickIterator<'a> {
    arena: &'a BrickArena,
    stack: Vec<Index>,
}

impl<'a> BrickIterator<'a> {
    fn new(arena: &'a BrickArena) -> Self {
        let stack = arena.roots.iter().rev().copied().collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for BrickIterator<'a> {
    type Item = &'a Brick;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some(&node.brick);
            }
        }
        None
    }
}
