//! Tests for FixtureStore and ServiceContainer against real files

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use sober::application::ApplicationError;
use sober::config::Settings;
use sober::domain::{BrickRepository, BrickType, DomainError};
use sober::infrastructure::di::ServiceContainer;
use sober::infrastructure::traits::RealFileSystem;
use sober::infrastructure::{FixtureStore, InfraError};
use sober::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const FIXTURE: &str = include_str!("resources/sober_data.json");

/// Temp dir holding a copy of the shared fixture.
#[fixture]
fn data_dir() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sober_data.json");
    std::fs::write(&path, FIXTURE).expect("write fixture");
    (temp, path)
}

fn container_for(path: PathBuf) -> ServiceContainer {
    ServiceContainer::new(Settings {
        data_file: Some(path),
        ..Settings::default()
    })
}

#[rstest]
fn given_fixture_file_when_loading_then_builds_arena(data_dir: (TempDir, PathBuf)) {
    let (_temp, path) = data_dir;
    let store = FixtureStore::new(Arc::new(RealFileSystem));

    let arena = store.load(&path).unwrap();

    assert_eq!(arena.len(), 16);
    assert_eq!(arena.depth(), 4);
    assert_eq!(arena.theses().len(), 2);
    assert_eq!(arena.get(21).unwrap().brick_type, BrickType::Contra);
}

#[rstest]
fn given_loaded_arena_when_saving_to_new_path_then_reloads_identically(
    data_dir: (TempDir, PathBuf),
) {
    let (temp, path) = data_dir;
    let store = FixtureStore::new(Arc::new(RealFileSystem));
    let arena = store.load(&path).unwrap();

    let copy = temp.path().join("nested/dir/copy.json");
    store.save(&copy, &arena).unwrap();
    let reloaded = store.load(&copy).unwrap();

    assert_eq!(reloaded.len(), arena.len());
    for brick in arena.iter() {
        assert_eq!(reloaded.get(brick.id), Some(brick));
    }
    // records of other models are not written back
    let written = std::fs::read_to_string(&copy).unwrap();
    assert!(!written.contains("settingsbunch"));
}

#[test]
fn given_missing_file_when_loading_then_returns_error_with_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.json");
    let store = FixtureStore::new(Arc::new(RealFileSystem));

    let err = store.load(&path).unwrap_err();

    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn given_malformed_json_when_loading_then_returns_fixture_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    std::fs::write(&path, "[{\"model\": ").unwrap();
    let store = FixtureStore::new(Arc::new(RealFileSystem));

    let err = store.load(&path).unwrap_err();

    assert!(matches!(err, InfraError::Fixture { .. }));
}

#[test]
fn given_dangling_parent_when_loading_then_returns_domain_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("dangling.json");
    std::fs::write(
        &path,
        r#"[{"model": "sober.brick", "pk": 2, "fields": {
            "type": "pro", "parent": 1, "title": "lost",
            "creation_datetime": "2019-01-01T10:00:00Z",
            "update_datetime": "2019-01-01T10:00:00Z"}}]"#,
    )
    .unwrap();
    let store = FixtureStore::new(Arc::new(RealFileSystem));

    let err = store.load(&path).unwrap_err();

    assert!(matches!(
        err,
        InfraError::Application(ApplicationError::Domain(DomainError::UnknownParent {
            id: 2,
            parent: 1
        }))
    ));
}

#[rstest]
fn given_container_when_building_tree_service_then_renders_configured_data(
    data_dir: (TempDir, PathBuf),
) {
    let (_temp, path) = data_dir;
    let container = container_for(path);

    let service = container.tree_service().unwrap();

    assert_eq!(service.render_from_root(12).unwrap().base.title_tag, "!7✓3");
}

#[test]
fn given_no_data_file_when_building_tree_service_then_config_error() {
    let container = ServiceContainer::new(Settings::default());

    let err = container.tree_service().err().unwrap();

    assert!(matches!(
        err,
        InfraError::Application(ApplicationError::Config { .. })
    ));
}

#[rstest]
fn given_new_and_edited_bricks_when_saved_then_persist_across_loads(
    data_dir: (TempDir, PathBuf),
) {
    let (_temp, path) = data_dir;
    let container = container_for(path);

    let mut arena = container.load_arena().unwrap();
    let id = arena
        .add_brick(Some(7), "qu", "Who pays for it?", "", Utc::now())
        .unwrap();
    let before = arena.get(8).unwrap().clone();
    arena
        .edit_brick(8, Some("Much cleaner air"), None, Utc::now())
        .unwrap();
    container.save_arena(&arena).unwrap();

    let service = container.tree_service().unwrap();
    assert_eq!(id, 31);
    assert_eq!(service.prepare_single_node(id).unwrap().title_tag, "!7?3");

    let edited = service.repository().get(8).unwrap();
    assert_eq!(edited.title, "Much cleaner air");
    assert_eq!(edited.creation_datetime, before.creation_datetime);
    assert!(edited.update_datetime > before.update_datetime);
}
