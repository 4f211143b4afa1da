//! # Scan Station
//!
//! The entry point for callers. A station owns at most one live session at a
//! time and wires it to the camera, the verification backend, the result
//! builder, the ledger and the router.
//!
//! The flow for one scan:
//! 1. [`ScanStation::start`] opens the camera.
//! 2. [`ScanStation::capture`] hands a decoded payload to verification, records
//!    the result in the ledger and returns the follow-up actions.
//! 3. [`ScanStation::cancel`] aborts at any point before that.
//!
//! The session lock is never held across the verification `.await`, so
//! cancelling stays immediate while a verification is pending.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time;
use tracing::{debug, info, warn};

use shelfscan_common::ScanError;
use shelfscan_common::scan::action::ScanAction;
use shelfscan_common::scan::device::Facing;
use shelfscan_common::scan::payload::RawCapturePayload;
use shelfscan_common::scan::result::ScanResult;
use shelfscan_common::scan::state::SessionState;
use shelfscan_common::scan::verification::VerificationOutcome;

use crate::builder::ResultBuilder;
use crate::device::CaptureDevice;
use crate::ledger::ScanLedger;
use crate::router;
use crate::session::{Resolution, ScanRequest, ScanSession, SessionId};
use crate::verifier::Verifier;

const DEFAULT_VERIFICATION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct StationConfig {
    /// A verification that takes longer is recorded as failed with reason `Timeout`.
    pub verification_timeout: Duration,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            verification_timeout: DEFAULT_VERIFICATION_TIMEOUT,
        }
    }
}

/// A recorded scan together with what the caller may do next.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub result: ScanResult,
    pub actions: BTreeSet<ScanAction>,
}

#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    /// Verification finished and the result is in the ledger.
    Recorded(ScanReport),
    /// The session was cancelled or replaced while verification was pending.
    /// Nothing was recorded.
    Discarded,
}

pub struct ScanStation {
    device: Arc<dyn CaptureDevice>,
    verifier: Arc<dyn Verifier>,
    ledger: Arc<ScanLedger>,
    builder: ResultBuilder,
    config: StationConfig,
    session: Mutex<Option<ScanSession>>,
    next_session: AtomicU64,
}

impl ScanStation {
    pub fn new(
        device: Arc<dyn CaptureDevice>,
        verifier: Arc<dyn Verifier>,
        ledger: Arc<ScanLedger>,
        config: StationConfig,
    ) -> Self {
        Self {
            device,
            verifier,
            ledger,
            builder: ResultBuilder::new(),
            config,
            session: Mutex::new(None),
            next_session: AtomicU64::new(1),
        }
    }

    pub fn ledger(&self) -> &Arc<ScanLedger> {
        &self.ledger
    }

    /// State of the current (or last) session, `Idle` if there never was one.
    pub fn state(&self) -> SessionState {
        self.lock_session()
            .as_ref()
            .map_or(SessionState::Idle, ScanSession::state)
    }

    /// Device error that ended the last session, if that is how it ended.
    pub fn last_device_error(&self) -> Option<ScanError> {
        self.lock_session()
            .as_ref()
            .and_then(|session| session.device_error().cloned())
    }

    /// Opens a new session and acquires the camera.
    ///
    /// Fails with [`ScanError::SessionInProgress`] while another session is
    /// live; that session is left untouched. Device errors are returned as
    /// they happen, and the new session is left in `Failed`.
    pub fn start(&self, request: ScanRequest) -> Result<SessionId, ScanError> {
        let mut slot = self.lock_session();
        if let Some(current) = slot.as_ref() {
            if !current.state().is_terminal() {
                return Err(ScanError::SessionInProgress {
                    state: current.state(),
                });
            }
        }

        let id = SessionId::new(self.next_session.fetch_add(1, Ordering::Relaxed));
        info!(
            "Session {id}: {} scan via {} ({} camera)",
            request.mode, request.technology, request.facing
        );

        let session = slot.insert(ScanSession::new(id, request, self.device.clone()));
        if let Err(err) = session.start() {
            warn!("Session {id}: {err}");
            return Err(err);
        }
        Ok(id)
    }

    pub fn switch_facing(&self, facing: Facing) -> Result<(), ScanError> {
        let mut slot = self.lock_session();
        let session = slot
            .as_mut()
            .ok_or(ScanError::invalid_state("switch facing", SessionState::Idle))?;
        session.switch_facing(facing)
    }

    /// Verifies `payload` and records the outcome, verified or not.
    pub async fn capture(&self, payload: RawCapturePayload) -> Result<CaptureOutcome, ScanError> {
        let (ticket, technology, mode) = {
            let mut slot = self.lock_session();
            let session = slot
                .as_mut()
                .ok_or(ScanError::invalid_state("capture", SessionState::Idle))?;
            let ticket = session.capture(payload.clone())?;
            (ticket, session.technology(), session.mode())
        };

        let verification = self.verifier.verify(&payload, technology, mode);
        let outcome = match time::timeout(self.config.verification_timeout, verification).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    "Session {}: verification timed out after {:?}",
                    ticket.session(),
                    self.config.verification_timeout
                );
                VerificationOutcome::timed_out()
            }
        };

        let mut slot = self.lock_session();
        let Some(session) = slot.as_mut() else {
            return Ok(CaptureOutcome::Discarded);
        };
        if let Resolution::Discarded = session.resolve(&ticket, outcome) {
            return Ok(CaptureOutcome::Discarded);
        }

        let result = self
            .builder
            .build(session, &payload, session.attribution())?;
        let actions = router::actions_for(&result);
        self.ledger.append(result.clone());

        match result.verification() {
            VerificationOutcome::Verified { reference } => {
                info!("Scan {} verified ({reference})", result.id())
            }
            VerificationOutcome::Rejected { reason } => {
                warn!("Scan {} could not be verified: {reason}", result.id())
            }
        }

        Ok(CaptureOutcome::Recorded(ScanReport { result, actions }))
    }

    /// Stops the live session and frees the camera. Nothing is recorded.
    pub fn cancel(&self) -> Result<(), ScanError> {
        let mut slot = self.lock_session();
        let session = slot
            .as_mut()
            .ok_or(ScanError::invalid_state("cancel", SessionState::Idle))?;
        session.cancel()?;
        debug!("Session {} cancelled", session.id());
        Ok(())
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<ScanSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
