use super::ClipboardStrategy;
use crate::capture::ClipboardBridge;
use crate::error::ClipboardError;
use async_trait::async_trait;
use std::sync::Arc;

/// The page's own asynchronous text write
///
/// Goes through the bridge; with no capture pending the bridge hands the
/// call straight to the page.
pub struct HostAsyncStrategy {
    bridge: Arc<ClipboardBridge>,
}

impl HostAsyncStrategy {
    pub fn new(bridge: Arc<ClipboardBridge>) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl ClipboardStrategy for HostAsyncStrategy {
    fn name(&self) -> &'static str {
        "page clipboard"
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        self.bridge.write_text(text).await
    }
}
