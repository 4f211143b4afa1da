use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use shelfscan_common::ScanError;
use shelfscan_common::scan::device::Facing;

use super::{CaptureDevice, DeviceHandle};

#[derive(Debug, Clone, Copy)]
struct LiveFeed {
    id: u64,
    facing: Facing,
}

/// An in-memory camera with a configurable set of inputs.
///
/// Models a single logical camera: opening one facing while the other is
/// streaming stops the running feed first.
pub struct SimulatedCamera {
    inputs: Vec<Facing>,
    permission_granted: bool,
    live: Mutex<Option<LiveFeed>>,
    next_id: AtomicU64,
}

impl SimulatedCamera {
    /// A camera with both a front and a rear input, access granted.
    pub fn new() -> Self {
        Self::with_inputs([Facing::Rear, Facing::Front])
    }

    pub fn with_inputs(inputs: impl IntoIterator<Item = Facing>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            permission_granted: true,
            live: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn deny_permission(mut self) -> Self {
        self.permission_granted = false;
        self
    }

    pub fn is_streaming(&self) -> bool {
        self.lock_live().is_some()
    }

    pub fn live_facing(&self) -> Option<Facing> {
        self.lock_live().map(|feed| feed.facing)
    }

    fn lock_live(&self) -> MutexGuard<'_, Option<LiveFeed>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureDevice for SimulatedCamera {
    fn acquire(&self, facing: Facing) -> Result<DeviceHandle, ScanError> {
        if !self.permission_granted {
            return Err(ScanError::PermissionDenied { facing });
        }
        if !self.inputs.contains(&facing) {
            return Err(ScanError::DeviceUnavailable { facing });
        }

        let mut live = self.lock_live();
        if let Some(previous) = live.take() {
            warn!(
                "Stopping {} feed #{} before opening the {facing} input",
                previous.facing, previous.id
            );
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        *live = Some(LiveFeed { id, facing });
        info!("Camera feed #{id} started ({facing})");

        Ok(DeviceHandle::new(id, facing))
    }

    fn release(&self, handle: &DeviceHandle) {
        let mut live = self.lock_live();
        let current = *live;
        match current {
            Some(feed) if feed.id == handle.id() => {
                *live = None;
                debug!("Camera feed #{} stopped", feed.id);
            }
            _ => debug!("Ignoring release of inactive feed #{}", handle.id()),
        }
    }
}
