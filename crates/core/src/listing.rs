//! Client-side list derivation for the projects table.
//!
//! The displayed table is a pure function of the fetched snapshot, the
//! active sort configuration and the search box contents. Sorting happens
//! first and is stable; filtering runs on the sorted output so hidden rows
//! never influence the order of visible ones.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::project::Project;
use crate::types::sortable_timestamp;

// ---------------------------------------------------------------------------
// Sort configuration
// ---------------------------------------------------------------------------

/// Record field a table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Address,
    City,
    State,
    Zip,
    AssetType,
    Model,
    CreatedAt,
    UpdatedAt,
}

impl SortKey {
    /// Textual value of this field on `project`. Absent values are `""`.
    pub fn text_of<'a>(self, project: &'a Project) -> Cow<'a, str> {
        match self {
            SortKey::Name => Cow::Borrowed(&project.name),
            SortKey::Address => Cow::Borrowed(&project.address),
            SortKey::City => Cow::Borrowed(&project.city),
            SortKey::State => Cow::Borrowed(&project.state),
            SortKey::Zip => Cow::Borrowed(&project.zip),
            SortKey::AssetType => {
                Cow::Borrowed(project.asset_type.map_or("", |t| t.as_str()))
            }
            SortKey::Model => Cow::Borrowed(project.model.as_str()),
            SortKey::CreatedAt => Cow::Owned(sortable_timestamp(&project.created_at)),
            SortKey::UpdatedAt => Cow::Owned(sortable_timestamp(&project.updated_at)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active ordering of the table. At most one key at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn by(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Handle a click on a column header.
    ///
    /// Clicking the active column flips its direction; clicking any other
    /// column sorts by it ascending.
    pub fn request_sort(&mut self, key: SortKey) {
        self.direction = if self.key == Some(key) {
            self.direction.flipped()
        } else {
            SortDirection::Ascending
        };
        self.key = Some(key);
    }

    /// Header arrow for `key`, if it is the active column.
    pub fn indicator(&self, key: SortKey) -> Option<&'static str> {
        if self.key != Some(key) {
            return None;
        }
        Some(match self.direction {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        })
    }

    fn compare(&self, key: SortKey, a: &Project, b: &Project) -> Ordering {
        let ordering = key.text_of(a).cmp(&key.text_of(b));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Stable sort of `records` per `config`. An unset key keeps input order.
pub fn sort_projects(records: &[Project], config: &SortConfig) -> Vec<Project> {
    let mut sorted = records.to_vec();
    if let Some(key) = config.key {
        sorted.sort_by(|a, b| config.compare(key, a, b));
    }
    sorted
}

/// Whether `project` matches an already lower-cased, non-empty needle.
fn matches_term(project: &Project, needle: &str) -> bool {
    let asset_type = project.asset_type.map_or("", |t| t.as_str());
    [project.name.as_str(), asset_type, project.model.as_str()]
        .into_iter()
        .any(|field| !field.is_empty() && field.to_lowercase().contains(needle))
}

/// Keep records whose name, asset type or model contains `term`,
/// ignoring case. An empty term keeps everything.
pub fn filter_projects(records: Vec<Project>, term: &str) -> Vec<Project> {
    if term.is_empty() {
        return records;
    }
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|p| matches_term(p, &needle))
        .collect()
}

/// Sort then filter: the rows the table should display.
pub fn derive_view(records: &[Project], config: &SortConfig, term: &str) -> Vec<Project> {
    filter_projects(sort_projects(records, config), term)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
