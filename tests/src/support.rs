use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use shelfscan_common::ScanError;
use shelfscan_common::scan::device::Facing;
use shelfscan_common::scan::mode::ScanMode;
use shelfscan_common::scan::payload::{RawCapturePayload, SourceType};
use shelfscan_common::scan::result::Attribution;
use shelfscan_common::scan::technology::ScanTechnology;
use shelfscan_common::scan::verification::VerificationOutcome;
use shelfscan_core::device::{CaptureDevice, DeviceHandle};
use shelfscan_core::ledger::ScanLedger;
use shelfscan_core::session::ScanRequest;
use shelfscan_core::station::{ScanStation, StationConfig};
use shelfscan_core::verifier::Verifier;

/// Records how often every handle was released, and can refuse to open.
#[derive(Default)]
pub struct CountingCamera {
    next_id: AtomicU64,
    releases: Mutex<HashMap<u64, usize>>,
    live: Mutex<Vec<u64>>,
    fail_with: Option<ScanError>,
    successes: Option<u64>,
}

impl CountingCamera {
    pub fn failing(err: ScanError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    /// Opens the first `successes` feeds, then fails every later acquire.
    pub fn failing_after(successes: u64, err: ScanError) -> Self {
        Self {
            fail_with: Some(err),
            successes: Some(successes),
            ..Self::default()
        }
    }

    pub fn acquisitions(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }

    /// Release count per handle id; every acquired handle appears.
    pub fn releases(&self) -> HashMap<u64, usize> {
        self.releases.lock().unwrap().clone()
    }

    pub fn live_feeds(&self) -> usize {
        self.live.lock().unwrap().len()
    }

    pub fn assert_each_released_once(&self) {
        let releases = self.releases();
        assert_eq!(releases.len() as u64, self.acquisitions());
        for (id, count) in releases {
            assert_eq!(count, 1, "handle {id} released {count} times");
        }
        assert_eq!(self.live_feeds(), 0);
    }
}

impl CaptureDevice for CountingCamera {
    fn acquire(&self, facing: Facing) -> Result<DeviceHandle, ScanError> {
        if let Some(err) = &self.fail_with {
            let exhausted = self
                .successes
                .is_none_or(|successes| self.acquisitions() >= successes);
            if exhausted {
                return Err(err.clone());
            }
        }
        let mut live = self.live.lock().unwrap();
        assert!(live.is_empty(), "acquired while feed {live:?} is still live");

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        live.push(id);
        self.releases.lock().unwrap().insert(id, 0);
        Ok(DeviceHandle::new(id, facing))
    }

    fn release(&self, handle: &DeviceHandle) {
        self.live.lock().unwrap().retain(|id| *id != handle.id());
        *self
            .releases
            .lock()
            .unwrap()
            .entry(handle.id())
            .or_default() += 1;
    }
}

/// Hands out the queued outcomes in order, verified by default.
#[derive(Default)]
pub struct ScriptedVerifier {
    outcomes: Mutex<VecDeque<VerificationOutcome>>,
}

impl ScriptedVerifier {
    pub fn new(outcomes: impl IntoIterator<Item = VerificationOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
        }
    }
}

#[async_trait]
impl Verifier for ScriptedVerifier {
    async fn verify(
        &self,
        _payload: &RawCapturePayload,
        _technology: ScanTechnology,
        _mode: ScanMode,
    ) -> VerificationOutcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| VerificationOutcome::verified("0xdefault"))
    }
}

/// Blocks every verification until [`GatedVerifier::open`] is called.
pub struct GatedVerifier {
    gate: Notify,
    outcome: VerificationOutcome,
}

impl GatedVerifier {
    pub fn new(outcome: VerificationOutcome) -> Self {
        Self {
            gate: Notify::new(),
            outcome,
        }
    }

    pub fn open(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl Verifier for GatedVerifier {
    async fn verify(
        &self,
        _payload: &RawCapturePayload,
        _technology: ScanTechnology,
        _mode: ScanMode,
    ) -> VerificationOutcome {
        self.gate.notified().await;
        self.outcome.clone()
    }
}

/// Never answers.
pub struct SilentVerifier;

#[async_trait]
impl Verifier for SilentVerifier {
    async fn verify(
        &self,
        _payload: &RawCapturePayload,
        _technology: ScanTechnology,
        _mode: ScanMode,
    ) -> VerificationOutcome {
        std::future::pending().await
    }
}

pub fn station(camera: Arc<CountingCamera>, verifier: Arc<dyn Verifier>) -> ScanStation {
    station_with_timeout(camera, verifier, Duration::from_secs(5))
}

pub fn station_with_timeout(
    camera: Arc<CountingCamera>,
    verifier: Arc<dyn Verifier>,
    verification_timeout: Duration,
) -> ScanStation {
    ScanStation::new(
        camera,
        verifier,
        Arc::new(ScanLedger::new()),
        StationConfig {
            verification_timeout,
        },
    )
}

pub fn request(mode: ScanMode, technology: ScanTechnology) -> ScanRequest {
    ScanRequest::new(
        mode,
        technology,
        Facing::Rear,
        Attribution::new("John Smith", "Warehouse A - Bay 3"),
    )
}

pub fn payload(product: &str, batch: &str) -> RawCapturePayload {
    RawCapturePayload::new(product, batch, SourceType::Product)
}
