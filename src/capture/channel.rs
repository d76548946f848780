//! Single-slot capture channel
//!
//! Holds at most one pending capture. The collector opens a request, clicks a
//! native copy button, and waits; whichever intercepted clipboard write fires
//! next settles the request. A request that nobody settles fails once its
//! timeout elapses.

use super::fragment::CapturedFragment;
use crate::error::CaptureError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Lifecycle of the capture slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Pending,
    Settled,
    TimedOut,
}

#[derive(Debug)]
struct Slot {
    state: CaptureState,
    sender: Option<oneshot::Sender<CapturedFragment>>,
    generation: u64,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            state: CaptureState::Idle,
            sender: None,
            generation: 0,
        }
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One-shot request/response slot shared between the collector and the
/// clipboard interception
#[derive(Debug, Clone, Default)]
pub struct CaptureChannel {
    slot: Arc<Mutex<Slot>>,
}

impl CaptureChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a capture request
    ///
    /// Fails with [`CaptureError::Busy`] while another request is pending.
    pub fn open(&self, timeout: Duration) -> Result<PendingCapture, CaptureError> {
        let mut slot = lock(&self.slot);
        if slot.state == CaptureState::Pending {
            warn!("Refusing to open a capture while one is pending");
            return Err(CaptureError::Busy);
        }

        let (sender, receiver) = oneshot::channel();
        slot.generation = slot.generation.wrapping_add(1);
        slot.state = CaptureState::Pending;
        slot.sender = Some(sender);
        debug!("Capture #{} opened ({:?})", slot.generation, timeout);

        Ok(PendingCapture {
            slot: Arc::clone(&self.slot),
            receiver,
            generation: slot.generation,
            timeout,
        })
    }

    /// Settle the pending request with a fragment
    ///
    /// Returns false without doing anything when no request is pending.
    pub fn settle(&self, fragment: CapturedFragment) -> bool {
        let mut slot = lock(&self.slot);
        if slot.state != CaptureState::Pending {
            debug!("Ignoring {} write: no capture pending", fragment.provenance);
            return false;
        }
        let Some(sender) = slot.sender.take() else {
            slot.state = CaptureState::Idle;
            return false;
        };
        slot.state = CaptureState::Settled;
        debug!(
            "Capture #{} settled via {} ({}, {} chars)",
            slot.generation,
            fragment.provenance,
            fragment.format,
            fragment.text.chars().count()
        );
        sender.send(fragment).is_ok()
    }

    pub fn state(&self) -> CaptureState {
        lock(&self.slot).state
    }
}

/// An open capture request
///
/// Dropping it before it settles frees the slot.
#[derive(Debug)]
pub struct PendingCapture {
    slot: Arc<Mutex<Slot>>,
    receiver: oneshot::Receiver<CapturedFragment>,
    generation: u64,
    timeout: Duration,
}

impl PendingCapture {
    /// Wait for the fragment, or fail once the timeout elapses
    pub async fn wait(mut self) -> Result<CapturedFragment, CaptureError> {
        match tokio::time::timeout(self.timeout, &mut self.receiver).await {
            Ok(Ok(fragment)) => Ok(fragment),
            Ok(Err(_)) => Err(CaptureError::Abandoned),
            Err(_) => {
                {
                    let mut slot = lock(&self.slot);
                    if slot.generation == self.generation && slot.state == CaptureState::Pending {
                        slot.state = CaptureState::TimedOut;
                        slot.sender = None;
                        debug!("Capture #{} timed out", self.generation);
                        return Err(CaptureError::Timeout(self.timeout));
                    }
                }
                // Settled in the same instant the timer fired
                self.receiver
                    .try_recv()
                    .map_err(|_| CaptureError::Timeout(self.timeout))
            }
        }
    }
}

impl Drop for PendingCapture {
    fn drop(&mut self) {
        let mut slot = lock(&self.slot);
        if slot.generation == self.generation && slot.state == CaptureState::Pending {
            slot.state = CaptureState::Idle;
            slot.sender = None;
        }
    }
}
