//! Project (property) record and its create/update DTOs.
//!
//! The wire and file format is camelCase JSON. Optional text fields are
//! stored as empty strings; `assetType` may be absent entirely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::{new_record_id, RecordId, Timestamp};

/// Entity name used in not-found errors.
pub const ENTITY: &str = "Project";

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Property asset class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    #[serde(rename = "Multi Family")]
    MultiFamily,
    Retail,
    #[serde(rename = "Self Storage")]
    SelfStorage,
    Office,
    Industrial,
}

impl AssetType {
    pub const ALL: [AssetType; 5] = [
        AssetType::MultiFamily,
        AssetType::Retail,
        AssetType::SelfStorage,
        AssetType::Office,
        AssetType::Industrial,
    ];

    /// Display label, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            AssetType::MultiFamily => "Multi Family",
            AssetType::Retail => "Retail",
            AssetType::SelfStorage => "Self Storage",
            AssetType::Office => "Office",
            AssetType::Industrial => "Industrial",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown asset type '{s}'")))
    }
}

/// Underwriting model used for the property. Empty when none was chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanModel {
    #[serde(rename = "CLIK IRR")]
    ClikIrr,
    #[serde(rename = "CREFC")]
    Crefc,
    #[serde(rename = "Self Storage template loan sizer")]
    SelfStorageLoanSizer,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl LoanModel {
    pub const ALL: [LoanModel; 4] = [
        LoanModel::ClikIrr,
        LoanModel::Crefc,
        LoanModel::SelfStorageLoanSizer,
        LoanModel::Unspecified,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LoanModel::ClikIrr => "CLIK IRR",
            LoanModel::Crefc => "CREFC",
            LoanModel::SelfStorageLoanSizer => "Self Storage template loan sizer",
            LoanModel::Unspecified => "",
        }
    }
}

impl fmt::Display for LoanModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanModel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoanModel::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown model '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A persisted project record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<AssetType>,
    #[serde(default)]
    pub model: LoanModel,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// Overwrite every field supplied in `input`.
    ///
    /// `id`, `created_at` and `updated_at` are not touched; stamping the
    /// update time is the store's job.
    pub fn apply_update(&mut self, input: &UpdateProject) {
        if let Some(name) = &input.name {
            self.name = name.clone();
        }
        if let Some(address) = &input.address {
            self.address = address.clone();
        }
        if let Some(city) = &input.city {
            self.city = city.clone();
        }
        if let Some(state) = &input.state {
            self.state = state.clone();
        }
        if let Some(zip) = &input.zip {
            self.zip = zip.clone();
        }
        if let Some(asset_type) = input.asset_type {
            self.asset_type = asset_type;
        }
        if let Some(model) = input.model {
            self.model = model;
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a project.
///
/// Everything is optional at the type level so that a missing required
/// field surfaces as a validation error rather than a parse failure.
/// Empty strings for `id`, `assetType` and the timestamps count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub asset_type: Option<AssetType>,
    pub model: Option<LoanModel>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl CreateProject {
    /// Ensure `name`, `address` and `city` are present and non-blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("address", &self.address),
            ("city", &self.city),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Validate and turn the DTO into a record.
    ///
    /// Assigns a fresh id when none was supplied and stamps both timestamps
    /// with `now` when absent. `updatedAt` never precedes `createdAt`.
    pub fn into_project(self, now: Timestamp) -> Result<Project, CoreError> {
        self.validate()?;

        let created_at = self.created_at.unwrap_or(now);
        let updated_at = self.updated_at.unwrap_or(now).max(created_at);

        Ok(Project {
            id: self.id.unwrap_or_else(new_record_id),
            name: self.name.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            zip: self.zip.unwrap_or_default(),
            asset_type: self.asset_type,
            model: self.model.unwrap_or_default(),
            created_at,
            updated_at,
        })
    }
}

/// DTO for updating a project. All fields are optional.
///
/// `id`, `createdAt` and `updatedAt` are deliberately absent: they are
/// ignored if a client sends them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Outer `None`: key absent, keep the stored value. `Some(None)`: the
    /// key was sent as `null` or `""`, clear it.
    #[serde(default, deserialize_with = "present_or_cleared", skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<Option<AssetType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<LoanModel>,
}

/// Deserialize an optional string-backed value, mapping `null`, a missing
/// key and `""` to `None`.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Only called when the key is present, so a missing key stays `None`
/// through `#[serde(default)]`.
fn present_or_cleared<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    empty_as_none(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
