//! Copy-all orchestration
//!
//! One run: make sure interception is installed, capture every turn, join
//! them, commit once to the real clipboard, and tell the user how it went.
//! Only the final commit can fail visibly; per-turn problems show up as
//! empty blocks.

use crate::assemble::{assemble, AssembledPayload};
use crate::capture::ClipboardBridge;
use crate::collect::TurnCollector;
use crate::error::ClipboardError;
use crate::feedback::{Feedback, Notice};
use crate::host::Element;
use crate::writer::ClipboardWriter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The page had no conversation turns; nothing was written
    NoConversation,
    /// Another run was still in flight
    Busy,
    Copied {
        payload: AssembledPayload,
        strategy: &'static str,
    },
    /// Every commit strategy failed; the payload was still assembled
    Failed {
        payload: AssembledPayload,
        error: ClipboardError,
    },
}

/// Clears the busy flag on every exit path
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
    feedback: &'a dyn Feedback,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool, feedback: &'a dyn Feedback) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            return None;
        }
        feedback.set_busy(true);
        Some(Self { flag, feedback })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
        self.feedback.set_busy(false);
    }
}

/// The toolbar button's action
pub struct CopyAll {
    bridge: Arc<ClipboardBridge>,
    collector: TurnCollector,
    writer: ClipboardWriter,
    feedback: Arc<dyn Feedback>,
    busy: AtomicBool,
}

impl CopyAll {
    pub fn new(
        bridge: Arc<ClipboardBridge>,
        collector: TurnCollector,
        writer: ClipboardWriter,
        feedback: Arc<dyn Feedback>,
    ) -> Self {
        Self {
            bridge,
            collector,
            writer,
            feedback,
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Copy the whole conversation on `page`
    pub async fn run(&self, page: &Element) -> CopyOutcome {
        let Some(_guard) = BusyGuard::acquire(&self.busy, self.feedback.as_ref()) else {
            warn!("Copy already in progress");
            return CopyOutcome::Busy;
        };

        self.bridge.install();

        let turns = self.collector.discover(page);
        if turns.is_empty() {
            info!("No conversation turns found");
            self.feedback.notify(&Notice::NoConversation);
            return CopyOutcome::NoConversation;
        }
        info!("Copying {} turns", turns.len());

        let collected = self.collector.collect_all(&turns).await;
        let payload = assemble(&collected);

        match self.writer.write(payload.as_str()).await {
            Ok(strategy) => {
                self.feedback.notify(&Notice::Copied);
                CopyOutcome::Copied { payload, strategy }
            }
            Err(error) => {
                warn!("Copy failed: {}", error);
                self.feedback.notify(&Notice::Failed(error.to_string()));
                CopyOutcome::Failed { payload, error }
            }
        }
    }
}
