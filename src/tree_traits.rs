//! Terminal rendering of processed brick trees.

use termtree::Tree;
use tracing::instrument;

use crate::application::services::BrickTree;
use crate::application::ProcessedBrick;

pub trait TreeNodeConvert {
    /// Build a printable tree, dropping bricks deeper than `max_rlevel`
    /// below the base brick.
    fn to_tree_string(&self, max_rlevel: usize) -> Tree<String>;
}

fn label(processed: &ProcessedBrick) -> String {
    format!(
        "{} {} [{}]",
        processed.title_tag,
        processed.brick.title,
        processed.id()
    )
}

/// Attach the top of the stack to its parent below it.
fn fold_top(stack: &mut Vec<Tree<String>>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(child) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.push(child);
        }
    }
}

impl TreeNodeConvert for BrickTree {
    #[instrument(level = "debug", skip(self), fields(base = self.base.id()))]
    fn to_tree_string(&self, max_rlevel: usize) -> Tree<String> {
        // The list is in pre-order, so the stack always holds the ancestors
        // of the next brick, one per relative level.
        let mut stack: Vec<Tree<String>> = Vec::new();
        for processed in self
            .bricks
            .iter()
            .filter(|p| p.relative_level <= max_rlevel)
        {
            while stack.len() > processed.relative_level.max(1) {
                fold_top(&mut stack);
            }
            stack.push(Tree::new(label(processed)));
        }
        while stack.len() > 1 {
            fold_top(&mut stack);
        }
        stack
            .pop()
            .unwrap_or_else(|| Tree::new(label(&self.base)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::TreeService;
    use crate::domain::{Brick, BrickArena, BrickId, BrickType};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn brick(id: BrickId, brick_type: BrickType, parent: Option<BrickId>, minute: u32) -> Brick {
        let at = Utc.with_ymd_and_hms(2019, 1, 1, 10, minute, 0).unwrap();
        Brick {
            id,
            brick_type,
            parent,
            title: format!("b{id}"),
            content: String::new(),
            cached_avg_vote: 0.0,
            creation_datetime: at,
            update_datetime: at,
        }
    }

    fn service() -> TreeService {
        let arena = BrickArena::from_bricks(vec![
            brick(1, BrickType::Thesis, None, 0),
            brick(2, BrickType::Pro, Some(1), 1),
            brick(3, BrickType::Question, Some(2), 2),
            brick(4, BrickType::Contra, Some(1), 3),
        ])
        .unwrap();
        TreeService::new(Arc::new(arena), 20)
    }

    #[test]
    fn given_thesis_tree_when_rendering_then_nests_by_level() {
        let tree = service().render_from_root(1).unwrap();

        let rendered = tree.to_tree_string(8).to_string();

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "!1 b1 [1]");
        assert!(lines[1].contains("!1✓1 b2 [2]"));
        assert!(lines[2].contains("!1✓1?1 b3 [3]"));
        assert!(lines[3].contains("!1⚡1 b4 [4]"));
        // grandchild is indented deeper than its parent
        assert!(lines[2].find('!').unwrap() > lines[1].find('!').unwrap());
    }

    #[test]
    fn given_max_rlevel_when_rendering_then_truncates_deeper_levels() {
        let tree = service().render_from_root(1).unwrap();

        let rendered = tree.to_tree_string(1).to_string();

        assert_eq!(rendered.lines().count(), 3);
        assert!(!rendered.contains("b3"));
    }

    #[test]
    fn given_zero_max_rlevel_when_rendering_then_shows_only_base() {
        let tree = service().render_from_root(2).unwrap();

        let rendered = tree.to_tree_string(0).to_string();

        assert_eq!(rendered.trim_end(), "!1✓1 b2 [2]");
    }
}
