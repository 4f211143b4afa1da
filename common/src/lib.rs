//! # Shared Models
//!
//! Types shared by every `shelfscan` crate: the scan domain models, the error
//! taxonomy and the runtime configuration. Nothing in here performs IO.

pub mod config;
pub mod error;
pub mod scan;

pub use error::ScanError;
