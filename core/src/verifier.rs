//! The verification backend port.
//!
//! The workflow only needs "one eventual answer per payload". How that answer
//! is produced (a ledger lookup, a remote call) is the adapter's business, and
//! bounding how long it may take is the caller's (see [`crate::station`]).

use async_trait::async_trait;

use shelfscan_common::scan::mode::ScanMode;
use shelfscan_common::scan::payload::RawCapturePayload;
use shelfscan_common::scan::technology::ScanTechnology;
use shelfscan_common::scan::verification::VerificationOutcome;

mod simulated;

pub use simulated::SimulatedVerifier;

#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(
        &self,
        payload: &RawCapturePayload,
        technology: ScanTechnology,
        mode: ScanMode,
    ) -> VerificationOutcome;
}
