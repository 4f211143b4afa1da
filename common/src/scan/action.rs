use std::fmt;

use serde::{Deserialize, Serialize};

/// A follow-up a recorded scan makes available to the caller.
///
/// Only *which* actions apply is decided here; running them is up to the
/// downstream handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanAction {
    UpdateInventory,
    StartTransfer,
    StartShipping,
    NoFurtherAction,
}

impl fmt::Display for ScanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanAction::UpdateInventory => "Update inventory",
            ScanAction::StartTransfer => "Start transfer",
            ScanAction::StartShipping => "Start shipping",
            ScanAction::NoFurtherAction => "No further action",
        };
        f.write_str(name)
    }
}
