//! Response envelope types for the projects endpoint.
//!
//! Each success shape has its own named envelope so handlers get
//! compile-time checking of the payload key.

use portfolio_core::project::Project;
use serde::Serialize;

/// `{ "projects": [...] }`
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

/// `{ "project": {...} }`
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub project: Project,
}

/// `{ "success": true }`
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
