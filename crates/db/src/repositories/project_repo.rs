//! Repository for the project collection.

use chrono::Utc;
use portfolio_core::error::CoreError;
use portfolio_core::project::{CreateProject, Project, UpdateProject, ENTITY};
use portfolio_core::types::advance_from;

use crate::error::StoreError;
use crate::store::ProjectStore;

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// List every project in collection (insertion) order.
    pub async fn list(store: &ProjectStore) -> Result<Vec<Project>, StoreError> {
        store.read_all().await
    }

    /// Find a project by id.
    pub async fn find_by_id(store: &ProjectStore, id: &str) -> Result<Option<Project>, StoreError> {
        let projects = store.read_all().await?;
        Ok(projects.into_iter().find(|p| p.id == id))
    }

    /// Validate, stamp and append a new project, returning the stored record.
    ///
    /// A caller-supplied id that already exists is rejected with
    /// [`CoreError::Conflict`].
    pub async fn create(store: &ProjectStore, input: CreateProject) -> Result<Project, StoreError> {
        let project = input.into_project(Utc::now())?;

        let project = store
            .mutate(move |projects| {
                if projects.iter().any(|p| p.id == project.id) {
                    return Err(CoreError::Conflict(format!(
                        "Project with id {} already exists",
                        project.id
                    ))
                    .into());
                }
                projects.push(project.clone());
                Ok(project)
            })
            .await?;

        tracing::info!(id = %project.id, name = %project.name, "Project created");
        Ok(project)
    }

    /// Merge `input` onto the project with `id` and stamp `updated_at`.
    ///
    /// `id` and `created_at` are preserved; `updated_at` always moves
    /// forward, whatever the caller sent.
    pub async fn update(
        store: &ProjectStore,
        id: &str,
        input: &UpdateProject,
    ) -> Result<Project, StoreError> {
        let project = store
            .mutate(|projects| {
                let existing = projects
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| not_found(id))?;

                existing.apply_update(input);
                existing.updated_at = advance_from(existing.updated_at);
                Ok(existing.clone())
            })
            .await?;

        tracing::info!(id = %project.id, "Project updated");
        Ok(project)
    }

    /// Remove the project with `id`. The collection is left untouched if it
    /// does not exist.
    pub async fn delete(store: &ProjectStore, id: &str) -> Result<(), StoreError> {
        store
            .mutate(|projects| {
                let index = projects
                    .iter()
                    .position(|p| p.id == id)
                    .ok_or_else(|| not_found(id))?;
                projects.remove(index);
                Ok(())
            })
            .await?;

        tracing::info!(id = %id, "Project deleted");
        Ok(())
    }
}

fn not_found(id: &str) -> StoreError {
    CoreError::NotFound {
        entity: ENTITY,
        id: id.to_string(),
    }
    .into()
}
