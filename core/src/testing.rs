//! Fakes shared by the unit tests of this crate.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use shelfscan_common::ScanError;
use shelfscan_common::scan::device::Facing;
use shelfscan_common::scan::mode::ScanMode;
use shelfscan_common::scan::payload::RawCapturePayload;
use shelfscan_common::scan::technology::ScanTechnology;
use shelfscan_common::scan::verification::VerificationOutcome;

use crate::device::{CaptureDevice, DeviceHandle};
use crate::verifier::Verifier;

/// Counts acquisitions and releases, and fails on demand.
#[derive(Default)]
pub struct CountingDevice {
    acquired: AtomicUsize,
    released: AtomicUsize,
    live: AtomicUsize,
    max_live: AtomicUsize,
    fail_with: Mutex<Option<ScanError>>,
}

impl CountingDevice {
    pub fn failing(err: ScanError) -> Self {
        let device = Self::default();
        *device.fail_with.lock().unwrap() = Some(err);
        device
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn max_live(&self) -> usize {
        self.max_live.load(Ordering::SeqCst)
    }
}

impl CaptureDevice for CountingDevice {
    fn acquire(&self, facing: Facing) -> Result<DeviceHandle, ScanError> {
        if let Some(err) = self.fail_with.lock().unwrap().clone() {
            return Err(err);
        }
        let id = self.acquired.fetch_add(1, Ordering::SeqCst) as u64 + 1;
        let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_live.fetch_max(live, Ordering::SeqCst);
        Ok(DeviceHandle::new(id, facing))
    }

    fn release(&self, _handle: &DeviceHandle) {
        self.released.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Answers every verification immediately with a fixed outcome.
pub struct FixedVerifier(pub VerificationOutcome);

#[async_trait]
impl Verifier for FixedVerifier {
    async fn verify(
        &self,
        _payload: &RawCapturePayload,
        _technology: ScanTechnology,
        _mode: ScanMode,
    ) -> VerificationOutcome {
        self.0.clone()
    }
}
