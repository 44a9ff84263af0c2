//! Dashboard-side client for the projects API.
//!
//! - [`api`]: typed HTTP client and the [`api::ProjectService`] seam.
//! - [`refresh`]: keeps a displayed snapshot in step with the store by
//!   refetching after every successful mutation.
//! - [`editor`]: the add/edit/delete form contract (a typed draft plus a
//!   save/cancel pair).

pub mod api;
pub mod editor;
pub mod refresh;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ClientError, ProjectService, ProjectsApi};
pub use editor::{EditorMode, EditorSession, ProjectDraft};
pub use refresh::{RefreshController, ViewStatus};
