//! Scripted stand-in for the live chat page
//!
//! Each copy button is given a script describing what the real page does when
//! it is clicked: which clipboard function it calls, what it offers, and how
//! long it takes. Clicking replays that script through the
//! [`ClipboardBridge`], exactly like the page's own handlers would.

use super::{ControlActivator, Element, ElementId};
use crate::capture::{ClipboardBridge, ClipboardItem, CopyEvent, HostClipboard};
use crate::error::{ClipboardError, FixtureError};
use crate::layout::{Rect, Size, ToolbarGeometry};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, error, warn};

/// What a copy button does when clicked
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "via", rename_all = "snake_case")]
pub enum CopyAction {
    WriteText { text: String },
    Write { items: Vec<ClipboardItem> },
    CopyEvent { data: BTreeMap<String, String> },
    /// The click does nothing clipboard-related
    Silent,
}

/// Script bound to one control
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptedCopy {
    pub control: ElementId,
    #[serde(default)]
    pub delay_ms: u64,
    pub action: CopyAction,
}

impl ScriptedCopy {
    pub fn new(control: ElementId, action: CopyAction) -> Self {
        Self {
            control,
            delay_ms: 0,
            action,
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

async fn perform(action: CopyAction, bridge: &ClipboardBridge) {
    let result = match action {
        CopyAction::WriteText { text } => bridge.write_text(&text).await,
        CopyAction::Write { items } => bridge.write(&items).await,
        CopyAction::CopyEvent { data } => {
            let mut event = CopyEvent::from(data);
            bridge.on_copy_event(&mut event);
            if !event.default_prevented() {
                debug!("Copy event left to default handling");
            }
            Ok(())
        }
        CopyAction::Silent => Ok(()),
    };
    if let Err(e) = result {
        error!("Page copy handler failed: {}", e);
    }
}

/// Page whose copy buttons replay scripts
pub struct SimulatedPage {
    bridge: Arc<ClipboardBridge>,
    scripts: HashMap<ElementId, ScriptedCopy>,
}

impl SimulatedPage {
    pub fn new(bridge: Arc<ClipboardBridge>, scripts: impl IntoIterator<Item = ScriptedCopy>) -> Self {
        Self {
            bridge,
            scripts: scripts.into_iter().map(|s| (s.control, s)).collect(),
        }
    }
}

impl ControlActivator for SimulatedPage {
    fn activate(&self, control: ElementId) {
        let Some(script) = self.scripts.get(&control).cloned() else {
            warn!("Control {} has no click handler", control);
            return;
        };
        let bridge = Arc::clone(&self.bridge);
        tokio::spawn(async move {
            if script.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(script.delay_ms)).await;
            }
            perform(script.action, &bridge).await;
        });
    }
}

/// Host clipboard that keeps writes in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    unavailable: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose every write fails
    pub fn unavailable() -> Self {
        Self {
            contents: Mutex::new(None),
            unavailable: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, text: String) -> Result<(), ClipboardError> {
        if self.unavailable {
            return Err(ClipboardError::Unavailable("page clipboard".into()));
        }
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(text);
        Ok(())
    }
}

#[async_trait]
impl HostClipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.store(text.to_string())
    }

    async fn write(&self, items: &[ClipboardItem]) -> Result<(), ClipboardError> {
        let text = items
            .iter()
            .find_map(|item| item.get_type("text/plain"))
            .unwrap_or_default();
        self.store(text.to_string())
    }
}

/// A page snapshot with its copy scripts, as loaded from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct PageFixture {
    pub document: Element,
    #[serde(default)]
    pub copies: Vec<ScriptedCopy>,
    /// Toolbar layout, used to place the injected button
    #[serde(default)]
    pub toolbar: Option<ToolbarGeometry>,
    /// Toast anchor when the toolbar layout is unknown
    #[serde(default)]
    pub anchor: Option<Rect>,
    #[serde(default)]
    pub viewport: Option<Size>,
}

impl PageFixture {
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let contents = std::fs::read_to_string(path).map_err(|e| FixtureError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(json: &str) -> Result<Self, FixtureError> {
        let fixture: PageFixture = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        if !seen.insert(fixture.document.id) {
            return Err(FixtureError::DuplicateId(fixture.document.id.0));
        }
        for el in fixture.document.descendants() {
            if !seen.insert(el.id) {
                return Err(FixtureError::DuplicateId(el.id.0));
            }
        }
        Ok(fixture)
    }
}
