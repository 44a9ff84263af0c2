pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /projects        GET list, POST create, PUT ?id= update,
///                  DELETE ?id= delete, OPTIONS
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(project::router())
}
