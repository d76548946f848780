//! Fallback: pipe the text into a platform copy utility

use super::ClipboardStrategy;
use crate::error::ClipboardError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// A copy utility and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyProgram {
    pub program: String,
    pub args: Vec<String>,
}

impl CopyProgram {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    async fn run(&self, text: &str) -> Result<(), ClipboardError> {
        let failed = |message: String| ClipboardError::WriteFailed {
            strategy: "copy utility",
            message,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ClipboardError::Unavailable(self.program.clone())
                } else {
                    failed(format!("{}: {}", self.program, e))
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| failed(format!("{}: {}", self.program, e)))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| failed(format!("{}: {}", self.program, e)))?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(format!("{} exited with {}", self.program, status)))
        }
    }
}

/// Tries each copy utility until one accepts the text
#[derive(Debug, Clone)]
pub struct CommandStrategy {
    programs: Vec<CopyProgram>,
}

impl CommandStrategy {
    pub fn new(programs: Vec<CopyProgram>) -> Self {
        Self { programs }
    }

    /// The usual copy utilities of the current platform
    pub fn for_platform() -> Self {
        let programs = if cfg!(target_os = "macos") {
            vec![CopyProgram::new("pbcopy", Vec::<String>::new())]
        } else if cfg!(windows) {
            vec![CopyProgram::new("clip", Vec::<String>::new())]
        } else {
            let mut programs = Vec::new();
            if std::env::var_os("WAYLAND_DISPLAY").is_some() {
                programs.push(CopyProgram::new("wl-copy", Vec::<String>::new()));
            }
            programs.push(CopyProgram::new("xclip", ["-selection", "clipboard"]));
            programs.push(CopyProgram::new("xsel", ["--clipboard", "--input"]));
            programs
        };
        Self::new(programs)
    }
}

#[async_trait]
impl ClipboardStrategy for CommandStrategy {
    fn name(&self) -> &'static str {
        "copy utility"
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let mut first_failure = None;
        for program in &self.programs {
            match program.run(text).await {
                Ok(()) => return Ok(()),
                Err(ClipboardError::Unavailable(name)) => {
                    debug!("{} not installed", name);
                }
                Err(e) => {
                    debug!("{}", e);
                    first_failure.get_or_insert(e);
                }
            }
        }
        Err(first_failure.unwrap_or_else(|| ClipboardError::Unavailable("copy utility".into())))
    }
}
