//! Final clipboard commit
//!
//! The assembled conversation is written once, trying each strategy in turn
//! until one succeeds:
//! 1. the process's own native clipboard handle
//! 2. the page's asynchronous clipboard write
//! 3. piping the text into the platform's copy utility
//!
//! On Linux the copy utility goes first: X11 and Wayland selections are owned
//! by a process, so text set through a native handle disappears when this
//! process exits, while `wl-copy`/`xclip`/`xsel` keep serving it.

mod command;
mod host;
mod native;
mod stdout;

pub use command::{CommandStrategy, CopyProgram};
pub use host::HostAsyncStrategy;
pub use native::{ArboardStrategy, SystemHostClipboard};
pub use stdout::StdoutStrategy;

use crate::capture::ClipboardBridge;
use crate::config::ClipboardConfig;
use crate::error::ClipboardError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// One way of putting text on the clipboard
#[async_trait]
pub trait ClipboardStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StrategyKind {
    Native,
    Host,
    Command,
}

#[cfg(target_os = "linux")]
const STRATEGY_ORDER: [StrategyKind; 3] =
    [StrategyKind::Command, StrategyKind::Native, StrategyKind::Host];

#[cfg(not(target_os = "linux"))]
const STRATEGY_ORDER: [StrategyKind; 3] =
    [StrategyKind::Native, StrategyKind::Host, StrategyKind::Command];

/// Ordered chain of clipboard strategies
pub struct ClipboardWriter {
    strategies: Vec<Box<dyn ClipboardStrategy>>,
}

impl ClipboardWriter {
    pub fn new(strategies: Vec<Box<dyn ClipboardStrategy>>) -> Self {
        Self { strategies }
    }

    /// The enabled strategies of `config`, in the platform's order
    pub fn from_config(config: &ClipboardConfig, bridge: Arc<ClipboardBridge>) -> Self {
        let mut strategies: Vec<Box<dyn ClipboardStrategy>> = Vec::new();
        for kind in STRATEGY_ORDER {
            match kind {
                StrategyKind::Native if config.use_native => {
                    strategies.push(Box::new(ArboardStrategy::new()));
                }
                StrategyKind::Host if config.use_host => {
                    strategies.push(Box::new(HostAsyncStrategy::new(bridge.clone())));
                }
                StrategyKind::Command if config.use_command => {
                    strategies.push(Box::new(CommandStrategy::for_platform()));
                }
                _ => {}
            }
        }
        Self::new(strategies)
    }

    /// Names of the strategies, in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Write `text`, returning the name of the strategy that succeeded
    pub async fn write(&self, text: &str) -> Result<&'static str, ClipboardError> {
        if self.strategies.is_empty() {
            return Err(ClipboardError::NoStrategies);
        }

        let mut failures = Vec::new();
        for strategy in &self.strategies {
            match strategy.write(text).await {
                Ok(()) => {
                    info!(
                        "Copied {} chars to clipboard via {}",
                        text.chars().count(),
                        strategy.name()
                    );
                    return Ok(strategy.name());
                }
                Err(e) => {
                    warn!("Clipboard strategy {} failed: {}", strategy.name(), e);
                    failures.push(e.to_string());
                }
            }
        }
        Err(ClipboardError::AllFailed(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::simulated::MemoryClipboard;
    use std::sync::Mutex;

    struct Fake {
        name: &'static str,
        fail_with: Option<ClipboardError>,
        written: Mutex<Vec<String>>,
    }

    impl Fake {
        fn ok(name: &'static str) -> Self {
            Self {
                name,
                fail_with: None,
                written: Mutex::new(Vec::new()),
            }
        }

        fn failing(name: &'static str, err: ClipboardError) -> Self {
            Self {
                fail_with: Some(err),
                ..Self::ok(name)
            }
        }
    }

    #[async_trait]
    impl ClipboardStrategy for Arc<Fake> {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn write(&self, text: &str) -> Result<(), ClipboardError> {
            if let Some(e) = &self.fail_with {
                return Err(e.clone());
            }
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let first = Arc::new(Fake::failing(
            "native",
            ClipboardError::Unavailable("native clipboard".into()),
        ));
        let second = Arc::new(Fake::ok("host"));
        let third = Arc::new(Fake::ok("command"));
        let writer = ClipboardWriter::new(vec![
            Box::new(first.clone()),
            Box::new(second.clone()),
            Box::new(third.clone()),
        ]);

        assert_eq!(writer.write("text").await.unwrap(), "host");
        assert_eq!(*second.written.lock().unwrap(), vec!["text".to_string()]);
        assert!(third.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_all_failures_are_reported() {
        let writer = ClipboardWriter::new(vec![
            Box::new(Arc::new(Fake::failing(
                "native",
                ClipboardError::Unavailable("native clipboard".into()),
            ))),
            Box::new(Arc::new(Fake::failing(
                "host",
                ClipboardError::WriteFailed {
                    strategy: "host",
                    message: "denied".into(),
                },
            ))),
        ]);

        let err = writer.write("text").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "native clipboard is not available; host failed: denied"
        );
    }

    fn bridge() -> Arc<ClipboardBridge> {
        Arc::new(ClipboardBridge::new(Arc::new(MemoryClipboard::new())))
    }

    fn all_enabled() -> ClipboardConfig {
        ClipboardConfig {
            use_native: true,
            use_host: true,
            use_command: true,
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_tries_copy_utility_before_native() {
        let writer = ClipboardWriter::from_config(&all_enabled(), bridge());
        assert_eq!(
            writer.strategy_names(),
            vec!["copy utility", "native", "page clipboard"]
        );
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_native_is_tried_first() {
        let writer = ClipboardWriter::from_config(&all_enabled(), bridge());
        assert_eq!(
            writer.strategy_names(),
            vec!["native", "page clipboard", "copy utility"]
        );
    }

    #[test]
    fn test_disabled_strategies_are_skipped() {
        let config = ClipboardConfig {
            use_native: false,
            use_command: false,
            ..all_enabled()
        };
        let writer = ClipboardWriter::from_config(&config, bridge());
        assert_eq!(writer.strategy_names(), vec!["page clipboard"]);
    }

    #[tokio::test]
    async fn test_no_strategies() {
        let writer = ClipboardWriter::new(Vec::new());
        assert_eq!(
            writer.write("x").await.unwrap_err(),
            ClipboardError::NoStrategies
        );
    }
}
