//! # Scan Workflow Core
//!
//! Drives a scan attempt from camera acquisition to a recorded, routed result.
//!
//! * **[`device`]**: the capture device port, its scoped [`device::FeedGuard`] and a simulated camera.
//! * **[`verifier`]**: the verification backend port and a simulated backend.
//! * **[`session`]**: the per-attempt state machine.
//! * **[`builder`]**: turns a terminal session into a [`ScanResult`](shelfscan_common::scan::result::ScanResult).
//! * **[`ledger`]**: append-only scan history with filters and metrics.
//! * **[`router`]**: maps a recorded scan to its follow-up actions.
//! * **[`station`]**: the entry point tying all of the above together.
//!
//! Adapters are injected as trait objects, so tests can swap the camera and the
//! backend for fakes.

pub mod builder;
pub mod device;
pub mod fixtures;
pub mod ledger;
pub mod router;
pub mod session;
pub mod station;
pub mod verifier;

#[cfg(test)]
pub(crate) mod testing;
