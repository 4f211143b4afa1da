//! # Scan Domain Models
//!
//! The records and value objects that flow through one scan attempt.
//!
//! * [`technology::ScanTechnology`] and [`mode::ScanMode`]: chosen before a scan starts.
//! * [`device::Facing`]: which camera input a session wants.
//! * [`payload::RawCapturePayload`]: what the decoder handed over.
//! * [`verification::VerificationOutcome`]: what the verification backend answered.
//! * [`result::ScanResult`]: the immutable record kept in the ledger.
//! * [`metrics::ScanMetrics`]: aggregates derived from the ledger.
//! * [`action::ScanAction`]: follow-ups a recorded scan can lead to.

pub mod action;
pub mod device;
pub mod metrics;
pub mod mode;
pub mod payload;
pub mod result;
pub mod state;
pub mod technology;
pub mod verification;

/// Uppercases and unifies separators so `qr-code`, `qr code` and `QR_CODE`
/// all parse the same way.
pub(crate) fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}
