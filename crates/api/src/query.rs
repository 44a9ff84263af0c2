//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Record addressing for the collection endpoint (`?id=`).
///
/// Optional at the type level so a missing id becomes a 400 with a
/// readable message instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

impl IdParams {
    /// The id, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}
