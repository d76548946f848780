//! Native clipboard via arboard

use super::ClipboardStrategy;
use crate::capture::{pick_from_items, ClipboardItem, HostClipboard};
use crate::error::ClipboardError;
use arboard::Clipboard;
use async_trait::async_trait;
use tracing::debug;

fn set_native_text(text: &str, strategy: &'static str) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new()
        .map_err(|e| ClipboardError::Unavailable(format!("native clipboard ({})", e)))?;
    clipboard
        .set_text(text)
        .map_err(|e| ClipboardError::WriteFailed {
            strategy,
            message: e.to_string(),
        })?;
    debug!("{} wrote {} chars", strategy, text.len());
    Ok(())
}

/// Direct write through the process's own clipboard access
#[derive(Debug, Default)]
pub struct ArboardStrategy;

impl ArboardStrategy {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClipboardStrategy for ArboardStrategy {
    fn name(&self) -> &'static str {
        "native"
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        set_native_text(text, self.name())
    }
}

/// The page's clipboard functions backed by the desktop clipboard
#[derive(Debug, Default)]
pub struct SystemHostClipboard;

impl SystemHostClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostClipboard for SystemHostClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        set_native_text(text, "page writeText")
    }

    async fn write(&self, items: &[ClipboardItem]) -> Result<(), ClipboardError> {
        let (text, _) = pick_from_items(items);
        set_native_text(&text, "page write")
    }
}
