//! Route definitions for the `/projects` collection.

use axum::routing::get;
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted under `/api`.
///
/// ```text
/// GET     /projects          -> list
/// POST    /projects          -> create
/// PUT     /projects?id={id}  -> update
/// DELETE  /projects?id={id}  -> delete
/// *       /projects          -> 405 with Allow header
/// ```
///
/// OPTIONS never reaches these routes: the CORS layer answers it with 200.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/projects",
        get(project::list)
            .post(project::create)
            .put(project::update)
            .delete(project::delete)
            .fallback(project::method_not_allowed),
    )
}
