//! User-visible feedback
//!
//! Short toasts shown next to the toolbar button.

use crate::layout::{place_toast, Rect, Size};
use std::fmt;
use std::time::Duration;
use tracing::info;

/// Messages shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoConversation,
    Copied,
    Failed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoConversation => write!(f, "没找到对话内容"),
            Notice::Copied => write!(f, "已复制到剪贴板"),
            Notice::Failed(reason) => write!(f, "复制失败：{}", reason),
        }
    }
}

/// Where notices and the button's busy state go
pub trait Feedback: Send + Sync {
    fn notify(&self, notice: &Notice);

    /// Mirror a run in flight on the control, e.g. by disabling it
    fn set_busy(&self, _busy: bool) {}
}

/// Rough toast box for a message, 13px font with 12px/10px padding
pub fn toast_size(message: &str) -> Size {
    let chars = message.chars().count() as f64;
    Size {
        width: (chars * 13.0 + 24.0).min(520.0),
        height: 36.0,
    }
}

/// Logs toasts with their placement
pub struct TracingFeedback {
    duration: Duration,
    anchor: Option<Rect>,
    viewport: Size,
}

impl TracingFeedback {
    pub fn new(duration: Duration, anchor: Option<Rect>, viewport: Size) -> Self {
        Self {
            duration,
            anchor,
            viewport,
        }
    }
}

impl Feedback for TracingFeedback {
    fn notify(&self, notice: &Notice) {
        let message = notice.to_string();
        let at = place_toast(self.anchor, toast_size(&message), self.viewport);
        info!(
            "Toast at ({}, {}) for {}ms: {}",
            at.x,
            at.y,
            self.duration.as_millis(),
            message
        );
    }

    fn set_busy(&self, busy: bool) {
        info!("Copy button {}", if busy { "disabled" } else { "enabled" });
    }
}
