use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a payload could not be verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    /// The backend answered, and the answer was "no".
    NotVerified,
    /// The backend did not answer in time.
    Timeout,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NotVerified => f.write_str("not verified"),
            RejectionReason::Timeout => f.write_str("timed out"),
        }
    }
}

/// The single answer a verification step produces.
///
/// A reference (a transaction identifier) exists exactly when the payload
/// was verified; the enum makes any other combination unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "VerificationRecord", try_from = "VerificationRecord")]
pub enum VerificationOutcome {
    Verified { reference: String },
    Rejected { reason: RejectionReason },
}

/// Flat wire shape: `{ "verified": bool, "reference"?: string, "reason"?: string }`.
#[derive(Serialize, Deserialize)]
struct VerificationRecord {
    verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<RejectionReason>,
}

impl From<VerificationOutcome> for VerificationRecord {
    fn from(outcome: VerificationOutcome) -> Self {
        match outcome {
            VerificationOutcome::Verified { reference } => Self {
                verified: true,
                reference: Some(reference),
                reason: None,
            },
            VerificationOutcome::Rejected { reason } => Self {
                verified: false,
                reference: None,
                reason: Some(reason),
            },
        }
    }
}

impl TryFrom<VerificationRecord> for VerificationOutcome {
    type Error = String;

    fn try_from(record: VerificationRecord) -> Result<Self, Self::Error> {
        match (record.verified, record.reference) {
            (true, Some(reference)) => Ok(VerificationOutcome::Verified { reference }),
            (true, None) => Err(String::from("verified outcome without a reference")),
            (false, Some(_)) => Err(String::from("rejected outcome carrying a reference")),
            (false, None) => Ok(VerificationOutcome::Rejected {
                reason: record.reason.unwrap_or(RejectionReason::NotVerified),
            }),
        }
    }
}

impl VerificationOutcome {
    pub fn verified(reference: impl Into<String>) -> Self {
        VerificationOutcome::Verified {
            reference: reference.into(),
        }
    }

    pub fn rejected() -> Self {
        VerificationOutcome::Rejected {
            reason: RejectionReason::NotVerified,
        }
    }

    pub fn timed_out() -> Self {
        VerificationOutcome::Rejected {
            reason: RejectionReason::Timeout,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified { .. })
    }

    pub fn reference(&self) -> Option<&str> {
        match self {
            VerificationOutcome::Verified { reference } => Some(reference),
            VerificationOutcome::Rejected { .. } => None,
        }
    }

    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        match self {
            VerificationOutcome::Verified { .. } => None,
            VerificationOutcome::Rejected { reason } => Some(*reason),
        }
    }
}
