use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of one scan session.
///
/// ```text
/// Idle -> Acquiring -> Active -> Verifying -> { Verified | Failed }
///            ^           |
///            +-----------+  (switch facing)
/// ```
///
/// `Cancelled` is reachable from every non-terminal state. `Failed` is also
/// entered straight from `Acquiring` when the camera cannot be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    Idle,
    Acquiring,
    Active,
    Verifying,
    Verified,
    Failed,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Verified | SessionState::Failed | SessionState::Cancelled
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Acquiring => "acquiring",
            SessionState::Active => "active",
            SessionState::Verifying => "verifying",
            SessionState::Verified => "verified",
            SessionState::Failed => "failed",
            SessionState::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}
