use thiserror::Error;

use crate::scan::device::Facing;
use crate::scan::state::SessionState;

/// Everything that can go wrong while driving a scan session.
///
/// A verification that comes back negative is **not** an error; it is a normal
/// terminal outcome (see [`crate::scan::verification::VerificationOutcome`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("camera access to the {facing} input was denied")]
    PermissionDenied { facing: Facing },

    #[error("no {facing} video input is available")]
    DeviceUnavailable { facing: Facing },

    #[error("a scan session is already in progress (currently {state})")]
    SessionInProgress { state: SessionState },

    #[error("cannot {operation} while the session is {state}")]
    InvalidSessionState {
        operation: &'static str,
        state: SessionState,
    },
}

impl ScanError {
    /// Fatal device-level failure, as opposed to a caller mistake.
    pub fn is_device_error(&self) -> bool {
        matches!(
            self,
            ScanError::PermissionDenied { .. } | ScanError::DeviceUnavailable { .. }
        )
    }

    pub fn invalid_state(operation: &'static str, state: SessionState) -> Self {
        ScanError::InvalidSessionState { operation, state }
    }
}
