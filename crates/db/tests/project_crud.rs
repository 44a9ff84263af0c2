//! Integration tests for the project store and repository.
//!
//! Each test runs against a fresh temporary data directory.

use std::sync::Arc;

use assert_matches::assert_matches;
use portfolio_core::error::CoreError;
use portfolio_core::project::{AssetType, CreateProject, UpdateProject};
use portfolio_db::repositories::ProjectRepo;
use portfolio_db::{open_store, ProjectStore, StoreError, PROJECTS_FILE};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: Some(name.to_string()),
        address: Some("1 Main".to_string()),
        city: Some("Austin".to_string()),
        asset_type: Some(AssetType::Retail),
        ..Default::default()
    }
}

async fn fresh_store() -> (TempDir, Arc<ProjectStore>) {
    let dir = TempDir::new().unwrap();
    let store = open_store(dir.path()).await.unwrap();
    (dir, store)
}

// ---------------------------------------------------------------------------
// Initialisation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn open_creates_directory_and_empty_file() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("nested").join("data");

    let store = open_store(&data_dir).await.unwrap();

    let contents = std::fs::read_to_string(data_dir.join(PROJECTS_FILE)).unwrap();
    assert_eq!(contents, "[]");
    assert!(ProjectRepo::list(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_recreates_a_deleted_file() {
    let (_dir, store) = fresh_store().await;
    std::fs::remove_file(store.path()).unwrap();

    assert!(ProjectRepo::list(&store).await.unwrap().is_empty());
    assert!(store.path().exists());
}

#[tokio::test]
async fn lazy_store_initialises_on_first_list() {
    let dir = TempDir::new().unwrap();
    let store = ProjectStore::new(dir.path().join("late").join(PROJECTS_FILE));

    assert!(ProjectRepo::list(&store).await.unwrap().is_empty());
    assert!(store.path().exists());
}

#[tokio::test]
async fn open_keeps_existing_collection() {
    let dir = TempDir::new().unwrap();
    {
        let store = open_store(dir.path()).await.unwrap();
        ProjectRepo::create(&store, new_project("Keep")).await.unwrap();
    }

    let store = open_store(dir.path()).await.unwrap();
    let projects = ProjectRepo::list(&store).await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "Keep");
}

#[tokio::test]
async fn malformed_file_is_a_storage_error() {
    let (_dir, store) = fresh_store().await;
    std::fs::write(store.path(), "{not json").unwrap();

    let err = ProjectRepo::list(&store).await.unwrap_err();
    assert!(err.is_storage());
    assert_matches!(err, StoreError::Serialization { .. });
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_assigns_id_and_equal_timestamps() {
    let (_dir, store) = fresh_store().await;

    let project = ProjectRepo::create(&store, new_project("Oak Tower")).await.unwrap();

    assert!(!project.id.is_empty());
    assert_eq!(project.created_at, project.updated_at);

    let listed = ProjectRepo::list(&store).await.unwrap();
    assert_eq!(listed, vec![project]);
}

#[tokio::test]
async fn create_generates_unique_ids() {
    let (_dir, store) = fresh_store().await;

    let mut ids = Vec::new();
    for i in 0..20 {
        let p = ProjectRepo::create(&store, new_project(&format!("P{i}"))).await.unwrap();
        ids.push(p.id);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[tokio::test]
async fn create_missing_required_field_is_validation_error() {
    let (_dir, store) = fresh_store().await;
    let mut input = new_project("No City");
    input.city = None;

    let err = ProjectRepo::create(&store, input).await.unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Validation(_)));
    assert!(ProjectRepo::list(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_existing_id_is_conflict() {
    let (_dir, store) = fresh_store().await;
    let mut input = new_project("First");
    input.id = Some("fixed".into());
    ProjectRepo::create(&store, input.clone()).await.unwrap();

    let err = ProjectRepo::create(&store, input).await.unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Conflict(_)));
    assert_eq!(ProjectRepo::list(&store).await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_creates_are_all_persisted() {
    let (_dir, store) = fresh_store().await;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                ProjectRepo::create(&store, new_project(&format!("P{i}"))).await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(ProjectRepo::list(&store).await.unwrap().len(), 16);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_merges_fields_and_advances_updated_at() {
    let (_dir, store) = fresh_store().await;
    let created = ProjectRepo::create(&store, new_project("Oak Tower")).await.unwrap();

    let input = UpdateProject {
        city: Some("Dallas".into()),
        ..Default::default()
    };
    let updated = ProjectRepo::update(&store, &created.id, &input).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.city, "Dallas");
    assert_eq!(updated.address, created.address);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let stored = ProjectRepo::find_by_id(&store, &created.id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn repeated_updates_keep_advancing() {
    let (_dir, store) = fresh_store().await;
    let created = ProjectRepo::create(&store, new_project("Loop")).await.unwrap();

    let mut previous = created.updated_at;
    for _ in 0..5 {
        let p = ProjectRepo::update(&store, &created.id, &UpdateProject::default())
            .await
            .unwrap();
        assert!(p.updated_at > previous);
        assert_eq!(p.created_at, created.created_at);
        previous = p.updated_at;
    }
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let (_dir, store) = fresh_store().await;

    let err = ProjectRepo::update(&store, "missing", &UpdateProject::default())
        .await
        .unwrap_err();
    assert_matches!(
        err,
        StoreError::Core(CoreError::NotFound { entity: "Project", ref id }) if id == "missing"
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_only_the_target() {
    let (_dir, store) = fresh_store().await;
    let keep = ProjectRepo::create(&store, new_project("Keep")).await.unwrap();
    let gone = ProjectRepo::create(&store, new_project("Gone")).await.unwrap();

    ProjectRepo::delete(&store, &gone.id).await.unwrap();

    let listed = ProjectRepo::list(&store).await.unwrap();
    assert_eq!(listed, vec![keep]);
    assert!(ProjectRepo::find_by_id(&store, &gone.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_unknown_id_leaves_collection_unchanged() {
    let (_dir, store) = fresh_store().await;
    ProjectRepo::create(&store, new_project("Stay")).await.unwrap();
    let before = std::fs::read_to_string(store.path()).unwrap();

    let err = ProjectRepo::delete(&store, "nope").await.unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::NotFound { .. }));

    let after = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(before, after);
}
