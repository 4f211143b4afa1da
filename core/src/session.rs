//! The per-attempt scan state machine.
//!
//! A [`ScanSession`] owns the camera feed for its whole life through a
//! [`FeedGuard`]. Every entry into a terminal state releases the feed, and the
//! guard makes sure that happens at most once.
//!
//! Verification is split in two halves so the session never has to wait on
//! anything: [`ScanSession::capture`] hands out a [`VerificationTicket`], and
//! [`ScanSession::resolve`] applies the outcome for that ticket later. An outcome
//! arriving after the session moved on (cancelled, or replaced) is discarded.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use shelfscan_common::ScanError;
use shelfscan_common::scan::device::Facing;
use shelfscan_common::scan::mode::ScanMode;
use shelfscan_common::scan::payload::RawCapturePayload;
use shelfscan_common::scan::result::Attribution;
use shelfscan_common::scan::state::SessionState;
use shelfscan_common::scan::technology::ScanTechnology;
use shelfscan_common::scan::verification::VerificationOutcome;

use crate::device::{CaptureDevice, FeedGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything the caller picks before a scan starts.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub mode: ScanMode,
    pub technology: ScanTechnology,
    pub facing: Facing,
    pub attribution: Attribution,
    pub notes: Option<String>,
}

impl ScanRequest {
    pub fn new(
        mode: ScanMode,
        technology: ScanTechnology,
        facing: Facing,
        attribution: Attribution,
    ) -> Self {
        Self {
            mode,
            technology,
            facing,
            attribution,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Proof that a verification was started for a specific session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationTicket {
    session: SessionId,
}

impl VerificationTicket {
    pub fn session(&self) -> SessionId {
        self.session
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The outcome moved the session into this terminal state.
    Applied(SessionState),
    /// The session was no longer waiting for this outcome.
    Discarded,
}

pub struct ScanSession {
    id: SessionId,
    state: SessionState,
    request: ScanRequest,
    feed: FeedGuard,
    payload: Option<RawCapturePayload>,
    captured_at: Option<DateTime<Utc>>,
    outcome: Option<VerificationOutcome>,
    device_error: Option<ScanError>,
}

impl ScanSession {
    pub fn new(id: SessionId, request: ScanRequest, device: Arc<dyn CaptureDevice>) -> Self {
        Self {
            id,
            state: SessionState::Idle,
            request,
            feed: FeedGuard::new(device),
            payload: None,
            captured_at: None,
            outcome: None,
            device_error: None,
        }
    }

    /// `Idle -> Acquiring -> Active`, or `Failed` when the camera cannot be opened.
    ///
    /// A device error is recorded on the session and also returned.
    pub fn start(&mut self) -> Result<(), ScanError> {
        self.require_state("start", SessionState::Idle)?;
        self.transition(SessionState::Acquiring);
        self.acquire_feed()
    }

    /// `Active -> Acquiring -> Active` on another input. The old feed is
    /// stopped before the new one is requested.
    pub fn switch_facing(&mut self, facing: Facing) -> Result<(), ScanError> {
        self.require_state("switch facing", SessionState::Active)?;
        self.transition(SessionState::Acquiring);
        self.feed.release();
        self.request.facing = facing;
        self.acquire_feed()
    }

    /// `Active -> Verifying`. The capture time is taken here, before
    /// verification starts.
    pub fn capture(&mut self, payload: RawCapturePayload) -> Result<VerificationTicket, ScanError> {
        self.require_state("capture", SessionState::Active)?;
        self.payload = Some(payload);
        self.captured_at = Some(Utc::now());
        self.transition(SessionState::Verifying);
        Ok(VerificationTicket { session: self.id })
    }

    /// `Verifying -> Verified | Failed`.
    pub fn resolve(&mut self, ticket: &VerificationTicket, outcome: VerificationOutcome) -> Resolution {
        if ticket.session != self.id || self.state != SessionState::Verifying {
            debug!(
                "Session {}: dropping late outcome for {} (state {})",
                self.id, ticket.session, self.state
            );
            return Resolution::Discarded;
        }

        let next = if outcome.is_verified() {
            SessionState::Verified
        } else {
            SessionState::Failed
        };
        self.outcome = Some(outcome);
        self.terminate(next);
        Resolution::Applied(next)
    }

    /// `Acquiring | Active | Verifying -> Cancelled`. A session that was never
    /// started has nothing to cancel.
    pub fn cancel(&mut self) -> Result<(), ScanError> {
        if self.state == SessionState::Idle || self.state.is_terminal() {
            return Err(ScanError::invalid_state("cancel", self.state));
        }
        self.terminate(SessionState::Cancelled);
        Ok(())
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> ScanMode {
        self.request.mode
    }

    pub fn technology(&self) -> ScanTechnology {
        self.request.technology
    }

    pub fn facing(&self) -> Facing {
        self.request.facing
    }

    pub fn attribution(&self) -> &Attribution {
        &self.request.attribution
    }

    pub fn notes(&self) -> Option<&str> {
        self.request.notes.as_deref()
    }

    pub fn payload(&self) -> Option<&RawCapturePayload> {
        self.payload.as_ref()
    }

    /// When the payload was captured, set on entry into `Verifying`.
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.captured_at
    }

    /// Set once verification finished, whichever way it went.
    pub fn outcome(&self) -> Option<&VerificationOutcome> {
        self.outcome.as_ref()
    }

    /// Set when the session failed because the camera could not be opened.
    pub fn device_error(&self) -> Option<&ScanError> {
        self.device_error.as_ref()
    }

    pub fn holds_device(&self) -> bool {
        self.feed.is_held()
    }

    fn acquire_feed(&mut self) -> Result<(), ScanError> {
        match self.feed.acquire(self.request.facing) {
            Ok(()) => {
                self.transition(SessionState::Active);
                Ok(())
            }
            Err(err) => {
                self.device_error = Some(err.clone());
                self.terminate(SessionState::Failed);
                Err(err)
            }
        }
    }

    fn require_state(
        &self,
        operation: &'static str,
        state: SessionState,
    ) -> Result<(), ScanError> {
        if self.state != state {
            return Err(ScanError::invalid_state(operation, self.state));
        }
        Ok(())
    }

    fn terminate(&mut self, state: SessionState) {
        self.transition(state);
        self.feed.release();
    }

    fn transition(&mut self, next: SessionState) {
        debug!("Session {}: {} -> {}", self.id, self.state, next);
        self.state = next;
    }
}

impl fmt::Debug for ScanSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("request", &self.request)
            .field("holds_device", &self.feed.is_held())
            .field("outcome", &self.outcome)
            .finish()
    }
}
