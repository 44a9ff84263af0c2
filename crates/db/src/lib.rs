//! File-backed persistence for project records.
//!
//! The whole collection lives in one pretty-printed JSON array. Every
//! mutation rewrites it wholesale; see [`store::ProjectStore`].

use std::path::Path;
use std::sync::Arc;

pub mod error;
pub mod repositories;
pub mod store;

pub use error::StoreError;
pub use store::ProjectStore;

/// File name of the project collection inside the data directory.
pub const PROJECTS_FILE: &str = "projects.json";

/// Shared handle to the store, cloned into every request.
pub type StorePool = Arc<ProjectStore>;

/// Open (and initialise if needed) the project collection under `data_dir`.
pub async fn open_store(data_dir: impl AsRef<Path>) -> Result<StorePool, StoreError> {
    let store = ProjectStore::open(data_dir.as_ref().join(PROJECTS_FILE)).await?;
    Ok(Arc::new(store))
}

/// Verify the collection file can be read and parsed.
pub async fn health_check(store: &ProjectStore) -> Result<(), StoreError> {
    store.read_all().await.map(|_| ())
}
