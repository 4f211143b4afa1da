//! The canonical record of one completed scan attempt.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mode::ScanMode;
use super::payload::{RawCapturePayload, SourceType};
use super::technology::ScanTechnology;
use super::verification::VerificationOutcome;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanId(String);

impl ScanId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who performed a scan and where. Opaque to the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribution {
    pub performed_by: String,
    pub location: String,
}

impl Attribution {
    pub fn new(performed_by: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            performed_by: performed_by.into(),
            location: location.into(),
        }
    }
}

/// Immutable once built. Fields are only reachable through getters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    id: ScanId,
    captured_at: DateTime<Utc>,
    product_id: String,
    batch_number: String,
    source: SourceType,
    technology: ScanTechnology,
    mode: ScanMode,
    performed_by: String,
    location: String,
    verification: VerificationOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl ScanResult {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ScanId,
        captured_at: DateTime<Utc>,
        payload: RawCapturePayload,
        technology: ScanTechnology,
        mode: ScanMode,
        attribution: Attribution,
        verification: VerificationOutcome,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            captured_at,
            product_id: payload.product_id,
            batch_number: payload.batch_number,
            source: payload.source_type,
            technology,
            mode,
            performed_by: attribution.performed_by,
            location: attribution.location,
            verification,
            notes,
        }
    }

    pub fn id(&self) -> &ScanId {
        &self.id
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn batch_number(&self) -> &str {
        &self.batch_number
    }

    pub fn source(&self) -> SourceType {
        self.source
    }

    pub fn technology(&self) -> ScanTechnology {
        self.technology
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn performed_by(&self) -> &str {
        &self.performed_by
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn verification(&self) -> &VerificationOutcome {
        &self.verification
    }

    pub fn is_verified(&self) -> bool {
        self.verification.is_verified()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Case-insensitive substring match over the searchable text fields.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [
            self.id.as_str(),
            self.product_id.as_str(),
            self.location.as_str(),
            self.performed_by.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}
