//! Pet status values, reference resolution outcomes, and naming rules (pet aggregate).
//!
//! A pet aggregate is a pet row plus its category, tags, and photo URLs.
//! Everything here is pure so the service layer and the repositories agree on
//! the same status strings and photo path convention.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of a pet name in characters.
pub const MAX_PET_NAME_LEN: usize = 255;

/// Path prefix for stored photo references.
pub const PHOTO_PATH_PREFIX: &str = "/pets";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a pet in the store.
///
/// Stored as lowercase text in `pets.status` (guarded by a CHECK constraint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Available,
    Pending,
    Sold,
}

impl PetStatus {
    /// Every status, in inventory order.
    pub const ALL: [PetStatus; 3] = [PetStatus::Available, PetStatus::Pending, PetStatus::Sold];

    pub fn as_str(self) -> &'static str {
        match self {
            PetStatus::Available => "available",
            PetStatus::Pending => "pending",
            PetStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(PetStatus::Available),
            "pending" => Ok(PetStatus::Pending),
            "sold" => Ok(PetStatus::Sold),
            other => Err(CoreError::Validation(format!(
                "invalid status: {other}. Must be one of: available, pending, sold"
            ))),
        }
    }
}

/// Parse the `status` query values of a find-by-status request.
///
/// Each value may itself be a comma-separated list. Blank entries are
/// skipped and duplicates collapse to their first occurrence, so the result
/// keeps the order in which the caller asked for them.
pub fn parse_status_filter(values: &[String]) -> Result<Vec<PetStatus>, CoreError> {
    let mut statuses = Vec::new();
    for raw in values.iter().flat_map(|v| v.split(',')) {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let status: PetStatus = raw.parse()?;
        if !statuses.contains(&status) {
            statuses.push(status);
        }
    }
    Ok(statuses)
}

// ---------------------------------------------------------------------------
// Reference resolution
// ---------------------------------------------------------------------------

/// Outcome of resolving a caller-supplied category or tag by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference<T> {
    /// A stored row with the requested name exists and is reused as-is.
    Existing(T),
    /// Nothing matched; a row with this name is created on persist.
    New(String),
}

impl<T> Reference<T> {
    pub fn is_new(&self) -> bool {
        matches!(self, Reference::New(_))
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a pet name: non-blank and at most [`MAX_PET_NAME_LEN`] characters.
pub fn validate_pet_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Pet name must not be empty".into()));
    }
    if name.chars().count() > MAX_PET_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Pet name must be at most {MAX_PET_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a reference name (category or tag).
pub fn validate_reference_name(kind: &str, name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!("{kind} name must not be empty")));
    }
    Ok(())
}

/// Every photo URL must be non-blank.
pub fn validate_photo_urls(urls: &[String]) -> Result<(), CoreError> {
    if urls.iter().any(|u| u.trim().is_empty()) {
        return Err(CoreError::Validation("photoUrls must not contain empty values".into()));
    }
    Ok(())
}

/// Decide whether a name lookup result conflicts with the pet being written.
///
/// `holder` is the id of the pet currently holding the name (if any) and
/// `writer` the id of the pet being renamed (`None` on create). A pet keeping
/// its own name is not a conflict.
pub fn is_name_conflict(holder: Option<DbId>, writer: Option<DbId>) -> bool {
    match (holder, writer) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(holder), Some(writer)) => holder != writer,
    }
}

// ---------------------------------------------------------------------------
// Photo references
// ---------------------------------------------------------------------------

/// Build the stored photo reference for an uploaded file.
///
/// Convention: `/pets/{pet_id}/{file_name}`. Only the final path segment of
/// the client-supplied name is kept.
pub fn photo_url_path(pet_id: DbId, file_name: &str) -> Result<String, CoreError> {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "." || base == ".." {
        return Err(CoreError::Validation(format!(
            "Invalid file name '{file_name}'"
        )));
    }

    Ok(format!("{PHOTO_PATH_PREFIX}/{pet_id}/{base}"))
}
