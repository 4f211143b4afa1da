//! Turns a finished session into its [`ScanResult`].

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

use shelfscan_common::ScanError;
use shelfscan_common::scan::payload::RawCapturePayload;
use shelfscan_common::scan::result::{Attribution, ScanId, ScanResult};
use shelfscan_common::scan::state::SessionState;

use crate::session::ScanSession;

/// Builds results and hands out their identifiers.
///
/// Ids are derived from the capture time in milliseconds and bumped when two
/// results land in the same millisecond, so they stay strictly increasing.
pub struct ResultBuilder {
    last_stamp: AtomicI64,
}

impl ResultBuilder {
    pub fn new() -> Self {
        Self {
            last_stamp: AtomicI64::new(i64::MIN),
        }
    }

    /// Only sessions that went through verification produce a result.
    /// Cancelled sessions, sessions that failed to open the camera and
    /// sessions still in flight are refused with
    /// [`ScanError::InvalidSessionState`].
    pub fn build(
        &self,
        session: &ScanSession,
        payload: &RawCapturePayload,
        attribution: &Attribution,
    ) -> Result<ScanResult, ScanError> {
        let (verification, captured_at) =
            match (session.state(), session.outcome(), session.captured_at()) {
                (SessionState::Verified | SessionState::Failed, Some(outcome), Some(at)) => {
                    (outcome.clone(), at)
                }
                (state, _, _) => return Err(ScanError::invalid_state("build a result", state)),
            };

        Ok(ScanResult::new(
            self.next_id(captured_at),
            captured_at,
            payload.clone(),
            session.technology(),
            session.mode(),
            attribution.clone(),
            verification,
            session.notes().map(str::to_owned),
        ))
    }

    fn next_id(&self, captured_at: DateTime<Utc>) -> ScanId {
        let now = captured_at.timestamp_millis();
        let bump = |last: i64| last.max(now - 1) + 1;
        let previous = match self
            .last_stamp
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(bump(last)))
        {
            Ok(previous) | Err(previous) => previous,
        };
        ScanId::new(format!("SCN-{}", bump(previous)))
    }
}

impl Default for ResultBuilder {
    fn default() -> Self {
        Self::new()
    }
}
