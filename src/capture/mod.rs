//! Clipboard capture
//!
//! Diverts the host page's clipboard writes into an awaited in-memory result
//! so the host's own copy buttons can be used as a text source.
//!
//! # Architecture
//! - [`CaptureChannel`] holds the single pending request
//! - [`ClipboardBridge`] wraps the host's three clipboard entry points
//!   (text write, structured write, copy event) and settles the channel
//!   while a request is pending

mod bridge;
mod channel;
mod fragment;

pub use bridge::{
    pick_from_event, pick_from_items, ClipboardBridge, ClipboardItem, CopyEvent, HostClipboard,
};
pub use channel::{CaptureChannel, CaptureState, PendingCapture};
pub use fragment::{CapturedFragment, Provenance, SourceFormat, PREFERRED_FORMATS};
