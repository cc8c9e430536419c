//! Tests for TreeService and the tree walker over a realistic argument tree
//!
//! Fixture layout (`resources/sober_data.json`), chronological order:
//!
//! ```text
//! 7 thesis
//! ├── 8 pro (vote 1.0)          ├── 15 pro ── 21 contra
//! │                             ├── 16 pro, 17 contra, 18 question
//! │                             └── 19 comment, 20 comment
//! ├── 9 contra, 10 pro (vote 3.0), 11 question
//! ├── 12 pro (vote 2.0), 13 comment, 14 question
//! 30 thesis
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use rstest::{fixture, rstest};

use sober::application::services::TreeService;
use sober::application::{BrickStore, ProcessedBrick, TreeWalker, WalkParams};
use sober::domain::{BrickArena, BrickId, BrickRepository, BrickType, DomainError};
use sober::infrastructure::fixture::parse_bricks;
use sober::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const FIXTURE: &str = include_str!("resources/sober_data.json");

#[fixture]
fn arena() -> BrickArena {
    BrickArena::from_bricks(parse_bricks(FIXTURE).expect("parse fixture")).expect("valid tree")
}

#[fixture]
fn service(arena: BrickArena) -> TreeService {
    TreeService::new(Arc::new(arena), 20)
}

fn ids(bricks: &[ProcessedBrick]) -> Vec<BrickId> {
    bricks.iter().map(|p| p.id()).collect()
}

#[rstest]
fn given_thesis_when_rendering_then_returns_depth_first_pre_order(service: TreeService) {
    let tree = service.render_from_root(7).unwrap();

    assert_eq!(tree.root_id, 7);
    assert_eq!(
        ids(&tree.bricks),
        vec![7, 8, 15, 21, 16, 17, 18, 19, 20, 12, 10, 9, 11, 14, 13]
    );
    // index arithmetic: first child, its first child, that one's child
    assert_eq!(tree.bricks[1].id(), 8);
    assert_eq!(tree.bricks[2].id(), 15);
    assert_eq!(tree.bricks[3].id(), 21);
}

#[rstest]
fn given_rendered_tree_when_checking_order_then_ancestors_precede_descendants(
    service: TreeService,
) {
    let tree = service.render_from_root(7).unwrap();
    let repo = service.repository();
    let position: HashMap<BrickId, usize> = tree
        .bricks
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id(), i))
        .collect();

    assert_eq!(tree.bricks[0].id(), 7);
    for processed in &tree.bricks {
        let mut current = processed.brick.parent;
        while let Some(ancestor) = current {
            assert!(
                position[&ancestor] < position[&processed.id()],
                "{} must come after its ancestor {}",
                processed.id(),
                ancestor
            );
            current = repo.get(ancestor).and_then(|b| b.parent);
        }
    }
}

#[rstest]
fn given_third_chronological_pro_when_rendering_then_tag_is_thesis_id_and_index(
    service: TreeService,
) {
    let tree = service.render_from_root(7).unwrap();
    let tags: HashMap<BrickId, &str> = tree
        .bricks
        .iter()
        .map(|p| (p.id(), p.title_tag.as_str()))
        .collect();

    assert_eq!(tags[&7], "!7");
    assert_eq!(tags[&8], "!7✓1");
    assert_eq!(tags[&10], "!7✓2");
    assert_eq!(tags[&12], "!7✓3");
    assert_eq!(tags[&9], "!7⚡1");
    assert_eq!(tags[&14], "!7?2");
    assert_eq!(tags[&13], "!7\"1");
    assert_eq!(tags[&20], "!7✓1\"2");
    assert_eq!(tags[&21], "!7✓1✓1⚡1");
}

#[rstest]
fn given_display_order_differs_when_rendering_then_indices_follow_creation_order(
    service: TreeService,
) {
    let tree = service.render_from_root(7).unwrap();
    let pros: Vec<(BrickId, usize)> = tree
        .bricks
        .iter()
        .filter(|p| p.brick.parent == Some(7) && p.brick.brick_type == BrickType::Pro)
        .map(|p| (p.id(), p.typed_idx))
        .collect();

    // shown by ascending vote, indexed by creation time
    assert_eq!(pros, vec![(8, 1), (12, 3), (10, 2)]);
}

#[rstest]
fn given_mixed_children_when_rendering_then_type_counts_are_complete(service: TreeService) {
    let tree = service.render_from_root(8).unwrap();
    let counter = &tree.base.child_type_counter;

    assert_eq!(counter.get(BrickType::Pro), 2);
    assert_eq!(counter.get(BrickType::Contra), 1);
    assert_eq!(counter.get(BrickType::Question), 1);
    assert_eq!(counter.get(BrickType::Comment), 2);
    assert_eq!(counter.get(BrickType::Thesis), 0);
    assert_eq!(counter.total(), 6);
    assert_eq!(
        tree.child_type_counts().iter().map(|(_, n)| n).sum::<usize>(),
        6
    );
}

#[rstest]
fn given_thesis_rooted_view_when_rendering_then_suppresses_one_level(service: TreeService) {
    let tree = service.render_from_root(7).unwrap();
    let indent: HashMap<BrickId, usize> = tree
        .bricks
        .iter()
        .map(|p| (p.id(), p.indentation))
        .collect();

    assert_eq!(indent[&7], 0);
    assert_eq!(indent[&8], 0);
    assert_eq!(indent[&15], 1);
    assert_eq!(indent[&21], 2);
    assert_eq!(tree.bricks[3].indentation_class(), "ml2");
}

#[rstest]
fn given_reaction_as_start_when_rendering_then_indents_and_levels_relative_to_it(
    service: TreeService,
) {
    let tree = service.render_from_root(15).unwrap();

    assert_eq!(tree.root_id, 7);
    assert_eq!(ids(&tree.bricks), vec![15, 21]);

    let base = &tree.base;
    assert_eq!(base.id(), 15);
    assert_eq!(base.relative_level, 0);
    assert_eq!(base.absolute_level, 2);
    assert_eq!(base.indentation, 0);
    assert_eq!(base.title_tag, "!7✓1✓1");

    let child = &tree.bricks[1];
    assert_eq!(child.relative_level, 1);
    assert_eq!(child.absolute_level, 3);
    assert_eq!(child.indentation, 1);
    assert_eq!(child.template, "sober/brick_contra.html");
}

#[rstest]
fn given_unchanged_data_when_rendering_twice_then_results_are_identical(service: TreeService) {
    let first = service.render_from_root(8).unwrap();
    let second = service.render_from_root(8).unwrap();

    assert_eq!(first.bricks, second.bricks);
}

#[rstest]
fn given_deep_brick_when_preparing_single_node_then_all_attributes_are_set(
    service: TreeService,
) {
    let processed = service.prepare_single_node(21).unwrap();

    assert_eq!(processed.id(), 21);
    assert_eq!(processed.absolute_level, 3);
    assert_eq!(processed.indentation, 2);
    assert_eq!(processed.typed_idx, 1);
    assert_eq!(processed.title_tag, "!7✓1✓1⚡1");
    assert_eq!(processed.child_type_counter.total(), 0);
    assert_eq!(
        processed
            .parent_path
            .segments()
            .iter()
            .map(|s| s.id)
            .collect::<Vec<_>>(),
        vec![7, 8, 15, 21]
    );
}

#[rstest]
#[case(7)]
#[case(12)]
#[case(17)]
#[case(21)]
fn given_unchanged_data_when_preparing_single_node_twice_then_results_are_identical(
    service: TreeService,
    #[case] id: BrickId,
) {
    let first = service.prepare_single_node(id).unwrap();
    let second = service.prepare_single_node(id).unwrap();

    assert_eq!(first, second);
}

#[rstest]
fn given_single_node_when_comparing_with_render_then_tags_agree(service: TreeService) {
    let tree = service.render_from_root(7).unwrap();

    for processed in &tree.bricks {
        let single = service.prepare_single_node(processed.id()).unwrap();
        assert_eq!(single.title_tag, processed.title_tag);
        assert_eq!(single.typed_idx, processed.typed_idx);
        assert_eq!(single.child_type_counter, processed.child_type_counter);
    }
}

#[rstest]
fn given_unknown_id_when_rendering_then_errors(service: TreeService) {
    let err = service.render_from_root(999).unwrap_err();
    assert!(err.to_string().contains("999"));

    assert!(service.prepare_single_node(999).is_err());
}

#[rstest]
fn given_fixture_when_listing_theses_then_returns_all_roots(service: TreeService) {
    let theses = service.list_theses();

    let tags: Vec<&str> = theses.iter().map(|t| t.title_tag.as_str()).collect();
    assert_eq!(tags, vec!["Thesis#7", "Thesis#30"]);
    assert!(theses.iter().all(|t| t.template == "sober/brick_thesis.html"));
}

#[rstest]
fn given_zero_max_level_when_walking_then_returns_only_start(arena: BrickArena) {
    let mut store = BrickStore::new();
    let start = arena.get(8).unwrap();

    let bricks = TreeWalker::new(&arena, &mut store)
        .walk(
            start,
            WalkParams {
                root_type: BrickType::Thesis,
                root_level_offset: 1,
                max_level: 0,
            },
            0,
        )
        .unwrap();

    assert_eq!(ids(&bricks), vec![8]);
    // the start still enumerates its children
    assert_eq!(bricks[0].child_type_counter.total(), 6);
    assert_eq!(bricks[0].absolute_level, 1);
}

#[rstest]
fn given_walk_when_finished_then_store_holds_every_visited_brick(arena: BrickArena) {
    let mut store = BrickStore::new();
    let root = arena.get(7).unwrap();

    let bricks = TreeWalker::new(&arena, &mut store)
        .walk(
            root,
            WalkParams {
                root_type: BrickType::Thesis,
                root_level_offset: 0,
                max_level: 1,
            },
            0,
        )
        .unwrap();

    assert_eq!(bricks.len(), 8);
    for processed in &bricks {
        assert_eq!(store.processed(processed.id()), Some(processed));
    }
    assert!(store.processed(15).is_none());
}

#[test]
fn given_cycle_free_arena_when_adding_brick_then_rejects_orphan_reaction() {
    let mut arena = BrickArena::from_bricks(parse_bricks(FIXTURE).unwrap()).unwrap();
    let now = chrono::Utc::now();

    let err = arena.add_brick(None, "pa", "orphan", "", now).unwrap_err();
    assert!(matches!(err, DomainError::RootInvariant { .. }));

    let id = arena.add_brick(Some(12), "ca", "but", "", now).unwrap();
    let service = TreeService::new(Arc::new(arena), 20);
    assert_eq!(service.prepare_single_node(id).unwrap().title_tag, "!7✓3⚡1");
}
