//! The **abstraction** over a video input that can be opened and closed.
//!
//! A [`CaptureDevice`] hands out at most one live [`DeviceHandle`] per logical
//! camera. Sessions never talk to the device directly; they hold a
//! [`FeedGuard`], which guarantees the feed is stopped on every exit path,
//! including early returns and panics.

use std::sync::Arc;

use shelfscan_common::ScanError;
use shelfscan_common::scan::device::Facing;

mod simulated;

pub use simulated::SimulatedCamera;

/// Token for one open video feed.
#[derive(Debug, PartialEq, Eq)]
pub struct DeviceHandle {
    id: u64,
    facing: Facing,
}

impl DeviceHandle {
    pub fn new(id: u64, facing: Facing) -> Self {
        Self { id, facing }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }
}

pub trait CaptureDevice: Send + Sync {
    /// Opens the input matching `facing` and starts its feed.
    ///
    /// If the logical camera already has a live feed, it is stopped first.
    fn acquire(&self, facing: Facing) -> Result<DeviceHandle, ScanError>;

    /// Stops the feed behind `handle`. Unknown or already released handles
    /// are ignored.
    fn release(&self, handle: &DeviceHandle);
}

/// Scoped ownership of at most one [`DeviceHandle`].
pub struct FeedGuard {
    device: Arc<dyn CaptureDevice>,
    handle: Option<DeviceHandle>,
}

impl FeedGuard {
    pub fn new(device: Arc<dyn CaptureDevice>) -> Self {
        Self {
            device,
            handle: None,
        }
    }

    /// Releases any held handle, then acquires a new one.
    pub fn acquire(&mut self, facing: Facing) -> Result<(), ScanError> {
        self.release();
        let handle = self.device.acquire(facing)?;
        self.handle = Some(handle);
        Ok(())
    }

    /// Hands the current handle back to the device. Does nothing when no
    /// handle is held, so a handle is never released twice through the guard.
    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.device.release(&handle);
        }
    }

    pub fn handle(&self) -> Option<&DeviceHandle> {
        self.handle.as_ref()
    }

    pub fn is_held(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for FeedGuard {
    fn drop(&mut self) {
        self.release();
    }
}
