//! Turn collection
//!
//! Finds every conversation turn in document order and captures its text by
//! clicking the turn's own copy button, one turn at a time. A turn that has
//! no button, or whose button never writes to the clipboard, contributes an
//! empty body; it never stops the remaining turns.

mod classifier;
mod turn;

pub use classifier::{GeminiClassifier, TurnClassifier};
pub use turn::{CollectedTurn, ConversationTurn, Role};

use crate::capture::{CapturedFragment, ClipboardBridge};
use crate::error::CaptureError;
use crate::host::{ControlActivator, Element, ElementId};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default time a copy button gets to write to the clipboard
pub const DEFAULT_CAPTURE_TIMEOUT: Duration = Duration::from_millis(1800);

/// Captures the text behind one native copy button
#[async_trait]
pub trait CopyTrigger: Send + Sync {
    async fn capture(&self, control: ElementId) -> Result<CapturedFragment, CaptureError>;
}

/// Clicks the button and waits for the intercepted clipboard write
pub struct ClickCapture {
    bridge: Arc<ClipboardBridge>,
    activator: Arc<dyn ControlActivator>,
    timeout: Duration,
}

impl ClickCapture {
    pub fn new(
        bridge: Arc<ClipboardBridge>,
        activator: Arc<dyn ControlActivator>,
        timeout: Duration,
    ) -> Self {
        Self {
            bridge,
            activator,
            timeout,
        }
    }
}

#[async_trait]
impl CopyTrigger for ClickCapture {
    async fn capture(&self, control: ElementId) -> Result<CapturedFragment, CaptureError> {
        let pending = self.bridge.channel().open(self.timeout)?;
        self.activator.activate(control);
        pending.wait().await
    }
}

/// Walks the conversation and captures every turn
pub struct TurnCollector {
    classifier: Arc<dyn TurnClassifier>,
    trigger: Arc<dyn CopyTrigger>,
}

impl TurnCollector {
    pub fn new(classifier: Arc<dyn TurnClassifier>, trigger: Arc<dyn CopyTrigger>) -> Self {
        Self {
            classifier,
            trigger,
        }
    }

    /// Classified turns of the page, in document order
    pub fn discover(&self, page: &Element) -> Vec<ConversationTurn> {
        page.descendants()
            .filter_map(|el| {
                let role = self.classifier.classify(el)?;
                let control = self.classifier.copy_control(el, role).map(|c| c.id);
                Some(ConversationTurn {
                    element: el.id,
                    role,
                    control,
                })
            })
            .collect()
    }

    /// Capture each turn in order
    ///
    /// The result has exactly one entry per turn.
    pub async fn collect_all(&self, turns: &[ConversationTurn]) -> Vec<CollectedTurn> {
        let mut collected = Vec::with_capacity(turns.len());
        for (index, turn) in turns.iter().enumerate() {
            let text = match self.capture_turn(turn).await {
                Ok(fragment) => {
                    debug!(
                        "Turn {} ({}) captured via {} as {}",
                        index, turn.role, fragment.provenance, fragment.format
                    );
                    fragment.text
                }
                Err(e) => {
                    warn!("Turn {} ({}) left empty: {}", index, turn.role, e);
                    String::new()
                }
            };
            collected.push(CollectedTurn::new(turn.role, text));
        }
        info!("Collected {} turns", collected.len());
        collected
    }

    async fn capture_turn(&self, turn: &ConversationTurn) -> Result<CapturedFragment, CaptureError> {
        let control = turn.control.ok_or(CaptureError::NoControl)?;
        self.trigger.capture(control).await
    }
}
