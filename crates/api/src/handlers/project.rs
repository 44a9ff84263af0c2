//! Handlers for the `/api/projects` collection endpoint.
//!
//! The collection is addressed by a single path; PUT and DELETE select a
//! record through the `?id=` query parameter.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::header::ALLOW;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use portfolio_core::project::{CreateProject, UpdateProject};
use portfolio_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::query::IdParams;
use crate::response::{ProjectListResponse, ProjectResponse, SuccessResponse};
use crate::state::AppState;

/// Value of the `Allow` header on 405 responses.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE";

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ProjectListResponse>> {
    let projects = ProjectRepo::list(&state.store).await?;
    Ok(Json(ProjectListResponse { projects }))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateProject>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    let Json(input) = payload?;
    input.validate()?;

    let project = ProjectRepo::create(&state.store, input).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse { project })))
}

/// PUT /api/projects?id={id}
pub async fn update(
    State(state): State<AppState>,
    query: Result<Query<IdParams>, QueryRejection>,
    payload: Result<Json<UpdateProject>, JsonRejection>,
) -> AppResult<Json<ProjectResponse>> {
    let Query(params) = query?;
    let id = require_id(&params)?;
    let Json(input) = payload?;

    let project = ProjectRepo::update(&state.store, id, &input).await?;
    Ok(Json(ProjectResponse { project }))
}

/// DELETE /api/projects?id={id}
pub async fn delete(
    State(state): State<AppState>,
    query: Result<Query<IdParams>, QueryRejection>,
) -> AppResult<Json<SuccessResponse>> {
    let Query(params) = query?;
    let id = require_id(&params)?;

    ProjectRepo::delete(&state.store, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Any other method on the collection.
pub async fn method_not_allowed(method: Method) -> Response {
    tracing::debug!(%method, "Unsupported method on projects endpoint");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(ALLOW, ALLOWED_METHODS)],
        format!("Method {method} Not Allowed"),
    )
        .into_response()
}

fn require_id(params: &IdParams) -> AppResult<&str> {
    params
        .id()
        .ok_or_else(|| AppError::BadRequest("Project ID is required".into()))
}
