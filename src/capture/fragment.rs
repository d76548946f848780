//! Captured clipboard fragments

use std::fmt;

/// Clipboard format a fragment was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// `text/markdown`, what the host writes alongside its rich copy
    Markdown,
    /// `text/plain`
    Plain,
    /// Nothing usable was offered
    None,
}

/// Formats read from intercepted writes, best first
pub const PREFERRED_FORMATS: [SourceFormat; 2] = [SourceFormat::Markdown, SourceFormat::Plain];

impl SourceFormat {
    pub fn mime(self) -> &'static str {
        match self {
            SourceFormat::Markdown => "text/markdown",
            SourceFormat::Plain => "text/plain",
            SourceFormat::None => "",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::None => write!(f, "none"),
            other => write!(f, "{}", other.mime()),
        }
    }
}

/// Intercepted entry point that produced a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    WriteText,
    Write,
    CopyEvent,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::WriteText => write!(f, "writeText"),
            Provenance::Write => write!(f, "write"),
            Provenance::CopyEvent => write!(f, "copy event"),
        }
    }
}

/// Text diverted from one intercepted clipboard write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFragment {
    pub text: String,
    pub format: SourceFormat,
    pub provenance: Provenance,
}

impl CapturedFragment {
    pub fn new(text: impl Into<String>, format: SourceFormat, provenance: Provenance) -> Self {
        Self {
            text: text.into(),
            format,
            provenance,
        }
    }
}
