use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors from a single turn's clipboard capture
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("A capture is already pending")]
    Busy,

    #[error("No clipboard write within {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Capture was abandoned before it settled")]
    Abandoned,

    #[error("Turn has no native copy control")]
    NoControl,
}

/// Clipboard commit errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("{0} is not available")]
    Unavailable(String),

    #[error("{strategy} failed: {message}")]
    WriteFailed {
        strategy: &'static str,
        message: String,
    },

    #[error("{}", .0.join("; "))]
    AllFailed(Vec<String>),

    #[error("No clipboard strategy is enabled")]
    NoStrategies,
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Page fixture errors
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid fixture JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Duplicate element id {0}")]
    DuplicateId(u64),
}
