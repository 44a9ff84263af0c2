//! Add/edit/delete form sessions.
//!
//! An [`EditorSession`] is opened for one action, holds a [`ProjectDraft`]
//! the form edits in place, and ends with either `save` or `cancel`.

use portfolio_core::project::{AssetType, CreateProject, LoanModel, Project, UpdateProject};

use crate::api::{ClientError, ProjectService};
use crate::refresh::RefreshController;

/// Form values for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub asset_type: AssetType,
    pub model: LoanModel,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            asset_type: AssetType::MultiFamily,
            model: LoanModel::default(),
        }
    }
}

impl ProjectDraft {
    /// Prefill from a stored record. A record without an asset type shows
    /// `Multi Family`.
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            address: project.address.clone(),
            city: project.city.clone(),
            state: project.state.clone(),
            zip: project.zip.clone(),
            asset_type: project.asset_type.unwrap_or(AssetType::MultiFamily),
            model: project.model,
        }
    }

    pub fn to_create(&self) -> CreateProject {
        CreateProject {
            name: Some(self.name.clone()),
            address: Some(self.address.clone()),
            city: Some(self.city.clone()),
            state: Some(self.state.clone()),
            zip: Some(self.zip.clone()),
            asset_type: Some(self.asset_type),
            model: Some(self.model),
            ..CreateProject::default()
        }
    }

    pub fn to_update(&self) -> UpdateProject {
        UpdateProject {
            name: Some(self.name.clone()),
            address: Some(self.address.clone()),
            city: Some(self.city.clone()),
            state: Some(self.state.clone()),
            zip: Some(self.zip.clone()),
            asset_type: Some(Some(self.asset_type)),
            model: Some(self.model),
        }
    }
}

/// What `save` does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit { id: String },
    /// Delete confirmation; the draft is shown read-only.
    Delete { id: String },
}

#[derive(Debug)]
pub struct EditorSession {
    mode: EditorMode,
    pub draft: ProjectDraft,
    open: bool,
    last_error: Option<String>,
}

impl EditorSession {
    /// Empty form for a new project.
    pub fn add() -> Self {
        Self::open(EditorMode::Add, ProjectDraft::default())
    }

    /// Form prefilled from `project`.
    pub fn edit(project: &Project) -> Self {
        Self::open(
            EditorMode::Edit {
                id: project.id.clone(),
            },
            ProjectDraft::from_project(project),
        )
    }

    pub fn confirm_delete(project: &Project) -> Self {
        Self::open(
            EditorMode::Delete {
                id: project.id.clone(),
            },
            ProjectDraft::from_project(project),
        )
    }

    fn open(mode: EditorMode, draft: ProjectDraft) -> Self {
        Self {
            mode,
            draft,
            open: true,
            last_error: None,
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Message of the most recent failed `save`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Submit the draft through `controller`.
    ///
    /// Returns the saved record for add/edit and `None` for delete. The
    /// session closes only on success; a failure keeps it open with the
    /// error recorded so the form can be corrected and resubmitted.
    pub async fn save<S: ProjectService>(
        &mut self,
        controller: &RefreshController<S>,
    ) -> Result<Option<Project>, ClientError> {
        if !self.open {
            return Err(ClientError::SessionClosed);
        }

        let result = match &self.mode {
            EditorMode::Add => controller.create(&self.draft.to_create()).await.map(Some),
            EditorMode::Edit { id } => controller
                .update(id, &self.draft.to_update())
                .await
                .map(Some),
            EditorMode::Delete { id } => controller.delete(id).await.map(|()| None),
        };

        match result {
            Ok(saved) => {
                self.open = false;
                self.last_error = None;
                Ok(saved)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Close without touching the store.
    pub fn cancel(&mut self) {
        self.open = false;
    }
}
