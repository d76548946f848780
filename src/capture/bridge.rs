//! Clipboard interception
//!
//! The bridge sits in front of the host page's clipboard functions. While a
//! capture is pending, writes made through it settle the capture and never
//! reach the real clipboard. Otherwise every call is handed to the host
//! unchanged.

use super::channel::CaptureChannel;
use super::fragment::{CapturedFragment, Provenance, SourceFormat, PREFERRED_FORMATS};
use crate::error::ClipboardError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// The host page's own clipboard functions
#[async_trait]
pub trait HostClipboard: Send + Sync {
    /// Direct text write
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Structured multi-format write
    async fn write(&self, items: &[ClipboardItem]) -> Result<(), ClipboardError>;
}

/// One item of a structured clipboard write: a set of (mime, data) pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipboardItem {
    entries: Vec<(String, String)>,
}

impl ClipboardItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, mime: impl Into<String>, data: impl Into<String>) -> Self {
        self.entries.push((mime.into(), data.into()));
        self
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(mime, _)| mime.as_str())
    }

    pub fn get_type(&self, mime: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(m, _)| m == mime)
            .map(|(_, data)| data.as_str())
    }
}

/// A copy event as dispatched to document listeners
#[derive(Debug, Clone, Default)]
pub struct CopyEvent {
    data: BTreeMap<String, String>,
    default_prevented: bool,
}

impl CopyEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, mime: impl Into<String>, data: impl Into<String>) -> Self {
        self.data.insert(mime.into(), data.into());
        self
    }

    /// Transfer data for a format, empty when absent
    pub fn get_data(&self, mime: &str) -> &str {
        self.data.get(mime).map(String::as_str).unwrap_or("")
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl From<BTreeMap<String, String>> for CopyEvent {
    fn from(data: BTreeMap<String, String>) -> Self {
        Self {
            data,
            default_prevented: false,
        }
    }
}

/// First item offering a preferred format wins; within it, the best format
pub fn pick_from_items(items: &[ClipboardItem]) -> (String, SourceFormat) {
    for item in items {
        for format in PREFERRED_FORMATS {
            if let Some(data) = item.get_type(format.mime()) {
                return (data.to_string(), format);
            }
        }
    }
    (String::new(), SourceFormat::None)
}

/// First non-empty preferred format in the event's transfer data
pub fn pick_from_event(event: &CopyEvent) -> (String, SourceFormat) {
    for format in PREFERRED_FORMATS {
        let data = event.get_data(format.mime());
        if !data.is_empty() {
            return (data.to_string(), format);
        }
    }
    (String::new(), SourceFormat::None)
}

/// Interception layer over the host clipboard
pub struct ClipboardBridge {
    channel: CaptureChannel,
    host: Arc<dyn HostClipboard>,
    installed: AtomicBool,
}

impl ClipboardBridge {
    pub fn new(host: Arc<dyn HostClipboard>) -> Self {
        Self {
            channel: CaptureChannel::new(),
            host,
            installed: AtomicBool::new(false),
        }
    }

    /// Activate interception
    ///
    /// Returns true only for the call that actually installed it.
    pub fn install(&self) -> bool {
        let newly = !self.installed.swap(true, Ordering::SeqCst);
        if newly {
            info!("Clipboard interception installed");
        }
        newly
    }

    pub fn uninstall(&self) {
        if self.installed.swap(false, Ordering::SeqCst) {
            info!("Clipboard interception removed");
        }
    }

    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    pub fn channel(&self) -> &CaptureChannel {
        &self.channel
    }

    /// Hand `fragment` to a pending capture, if there is one to settle
    fn divert(&self, fragment: CapturedFragment) -> bool {
        self.is_installed() && self.channel.settle(fragment)
    }

    /// Intercepted direct text write
    pub async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let fragment = CapturedFragment::new(text, SourceFormat::Plain, Provenance::WriteText);
        if self.divert(fragment) {
            return Ok(());
        }
        self.host.write_text(text).await
    }

    /// Intercepted structured write
    pub async fn write(&self, items: &[ClipboardItem]) -> Result<(), ClipboardError> {
        let (text, format) = pick_from_items(items);
        if self.divert(CapturedFragment::new(text, format, Provenance::Write)) {
            return Ok(());
        }
        self.host.write(items).await
    }

    /// Copy-event listener
    ///
    /// While capturing, reads the event's data and cancels its default action.
    pub fn on_copy_event(&self, event: &mut CopyEvent) {
        if !self.is_installed() {
            return;
        }
        let (text, format) = pick_from_event(event);
        if self.divert(CapturedFragment::new(text, format, Provenance::CopyEvent)) {
            event.prevent_default();
            debug!("Copy event diverted");
        }
    }
}
