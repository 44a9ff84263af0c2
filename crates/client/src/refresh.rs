//! Mutate-then-refetch controller behind the projects table.
//!
//! The controller owns the last fetched snapshot plus the view parameters
//! (sort, search) and derives the visible rows with the list engine.
//!
//! Status transitions:
//!
//! ```text
//! Idle | Ready | Error --refresh--> Loading --ok--> Ready
//!                                           --err-> Error (snapshot kept)
//! ```
//!
//! Mutations do not enter `Loading` themselves. A successful mutation
//! triggers a refresh; a failed one leaves status and snapshot untouched.
//! Refresh cycles are serialised, so the snapshot is always the result of
//! exactly one completed fetch.

use portfolio_core::listing::{derive_view, SortConfig, SortKey};
use portfolio_core::project::{CreateProject, Project, UpdateProject};
use tokio::sync::{Mutex, RwLock};

use crate::api::{ClientError, ProjectService};

/// Load status of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    /// Nothing fetched yet.
    Idle,
    Loading,
    Ready,
    /// The most recent fetch failed; carries its message.
    Error(String),
}

#[derive(Debug)]
struct ViewState {
    status: ViewStatus,
    snapshot: Vec<Project>,
    sort: SortConfig,
    search_term: String,
}

/// Keeps a displayed project list consistent with the record service.
///
/// Methods take `&self`; wrap in `Arc` to share between UI tasks.
pub struct RefreshController<S> {
    service: S,
    state: RwLock<ViewState>,
    refresh_cycle: Mutex<()>,
}

impl<S: ProjectService> RefreshController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: RwLock::new(ViewState {
                status: ViewStatus::Idle,
                snapshot: Vec::new(),
                sort: SortConfig::default(),
                search_term: String::new(),
            }),
            refresh_cycle: Mutex::new(()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn status(&self) -> ViewStatus {
        self.state.read().await.status.clone()
    }

    /// The last successfully fetched collection, in store order.
    pub async fn snapshot(&self) -> Vec<Project> {
        self.state.read().await.snapshot.clone()
    }

    /// Rows to display: the snapshot sorted, then filtered.
    pub async fn visible(&self) -> Vec<Project> {
        let state = self.state.read().await;
        derive_view(&state.snapshot, &state.sort, &state.search_term)
    }

    pub async fn sort_config(&self) -> SortConfig {
        self.state.read().await.sort
    }

    /// Column header click.
    pub async fn request_sort(&self, key: SortKey) {
        self.state.write().await.sort.request_sort(key);
    }

    pub async fn set_search_term(&self, term: impl Into<String>) {
        self.state.write().await.search_term = term.into();
    }

    /// Fetch the full collection and replace the snapshot.
    ///
    /// Waits for any refresh already in flight. On failure the status
    /// becomes [`ViewStatus::Error`] and the previous snapshot is kept.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let _cycle = self.refresh_cycle.lock().await;
        self.state.write().await.status = ViewStatus::Loading;

        let result = self.service.list().await;

        let mut state = self.state.write().await;
        match result {
            Ok(projects) => {
                tracing::debug!(count = projects.len(), "Projects refreshed");
                state.snapshot = projects;
                state.status = ViewStatus::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching projects");
                state.status = ViewStatus::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// Create a project, then refetch.
    pub async fn create(&self, input: &CreateProject) -> Result<Project, ClientError> {
        let project = self
            .service
            .create(input)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Error adding project"))?;
        self.refresh_after_mutation().await;
        Ok(project)
    }

    /// Update a project, then refetch.
    pub async fn update(&self, id: &str, input: &UpdateProject) -> Result<Project, ClientError> {
        let project = self
            .service
            .update(id, input)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, %id, "Error updating project"))?;
        self.refresh_after_mutation().await;
        Ok(project)
    }

    /// Delete a project, then refetch.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.service
            .delete(id)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, %id, "Error deleting project"))?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// The mutation already succeeded; a failed refetch only shows up in
    /// [`ViewStatus::Error`].
    async fn refresh_after_mutation(&self) {
        let _ = self.refresh().await;
    }
}
