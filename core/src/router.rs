//! Maps a recorded scan to the follow-up actions it makes available.

use std::collections::BTreeSet;

use shelfscan_common::scan::action::ScanAction;
use shelfscan_common::scan::mode::ScanMode;
use shelfscan_common::scan::result::ScanResult;

/// Only verified scans lead anywhere; a failed one always maps to
/// [`ScanAction::NoFurtherAction`].
pub fn actions_for(result: &ScanResult) -> BTreeSet<ScanAction> {
    if !result.is_verified() {
        return BTreeSet::from([ScanAction::NoFurtherAction]);
    }
    BTreeSet::from([action_for_mode(result.mode())])
}

pub fn action_for_mode(mode: ScanMode) -> ScanAction {
    match mode {
        ScanMode::Inventory | ScanMode::Receipt => ScanAction::UpdateInventory,
        ScanMode::Transfer => ScanAction::StartTransfer,
        ScanMode::Shipping => ScanAction::StartShipping,
        ScanMode::Verification => ScanAction::NoFurtherAction,
    }
}
