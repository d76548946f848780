//! Dry-run commit target

use super::ClipboardStrategy;
use crate::error::ClipboardError;
use async_trait::async_trait;
use std::io::Write;

/// Write `text` exactly as given, with no trailing newline
fn emit(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// Prints the payload to stdout instead of touching the clipboard
#[derive(Debug, Default)]
pub struct StdoutStrategy;

impl StdoutStrategy {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClipboardStrategy for StdoutStrategy {
    fn name(&self) -> &'static str {
        "stdout"
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        emit(&mut std::io::stdout().lock(), text).map_err(|e| ClipboardError::WriteFailed {
            strategy: self.name(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_payload_byte_for_byte() {
        let mut out = Vec::new();
        emit(&mut out, "「用户」\nhi\n\n========\n\n「助手」\n").unwrap();
        assert_eq!(out, "「用户」\nhi\n\n========\n\n「助手」\n".as_bytes());

        let mut out = Vec::new();
        emit(&mut out, "no newline").unwrap();
        assert_eq!(out, b"no newline");
    }
}
