//! In-memory [`ProjectService`] for unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use portfolio_core::error::CoreError;
use portfolio_core::project::{AssetType, CreateProject, Project, UpdateProject};
use portfolio_core::types::advance_from;

use crate::api::{ClientError, ProjectService};

#[derive(Default)]
pub struct FakeService {
    records: Mutex<Vec<Project>>,
    list_calls: AtomicUsize,
    fail_lists: AtomicBool,
}

impl FakeService {
    /// Seed one record per name, cycling through the asset types.
    pub fn with_names(names: &[&str]) -> Self {
        let records = names
            .iter()
            .zip(AssetType::ALL.into_iter().cycle())
            .map(|(name, asset_type)| {
                let mut input = create_input(name);
                input.asset_type = Some(asset_type);
                input.into_project(Utc::now()).unwrap()
            })
            .collect();
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }
}

fn api_error(err: CoreError) -> ClientError {
    let status = match err {
        CoreError::NotFound { .. } => 404,
        CoreError::Validation(_) => 400,
        CoreError::Conflict(_) => 409,
    };
    ClientError::Api {
        status,
        message: err.to_string(),
    }
}

fn not_found(id: &str) -> ClientError {
    api_error(CoreError::NotFound {
        entity: portfolio_core::project::ENTITY,
        id: id.to_string(),
    })
}

#[async_trait]
impl ProjectService for FakeService {
    async fn list(&self) -> Result<Vec<Project>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: 500,
                message: "Failed to fetch projects".into(),
            });
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(&self, input: &CreateProject) -> Result<Project, ClientError> {
        let project = input.clone().into_project(Utc::now()).map_err(api_error)?;
        self.records.lock().unwrap().push(project.clone());
        Ok(project)
    }

    async fn update(&self, id: &str, input: &UpdateProject) -> Result<Project, ClientError> {
        let mut records = self.records.lock().unwrap();
        let project = records
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;
        project.apply_update(input);
        project.updated_at = advance_from(project.updated_at);
        Ok(project.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|p| p.id != id);
        if records.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}

/// A valid create payload with the given name.
pub fn create_input(name: &str) -> CreateProject {
    CreateProject {
        name: Some(name.to_string()),
        address: Some("1 Main".into()),
        city: Some("Austin".into()),
        ..CreateProject::default()
    }
}
