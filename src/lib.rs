//! Copy a whole chat conversation to the clipboard
//!
//! Instead of converting the rendered page to text, each message's own copy
//! button is clicked in turn and the clipboard write it makes is intercepted.
//! The captured pieces are joined with role tags and written to the real
//! clipboard once.

pub mod assemble;
pub mod capture;
pub mod collect;
pub mod config;
pub mod copy_all;
pub mod error;
pub mod feedback;
pub mod host;
pub mod layout;
pub mod toolbar;
pub mod writer;

pub use assemble::{assemble, AssembledPayload};
pub use capture::{CaptureChannel, CapturedFragment, ClipboardBridge, HostClipboard};
pub use collect::{ClickCapture, CollectedTurn, CopyTrigger, GeminiClassifier, Role, TurnCollector};
pub use config::Config;
pub use copy_all::{CopyAll, CopyOutcome};
pub use error::*;
pub use feedback::{Feedback, Notice, TracingFeedback};
pub use writer::ClipboardWriter;
