#![deny(clippy::all)]

use anyhow::Context;
use clap::Parser;
use copy_all_chat::capture::{ClipboardBridge, HostClipboard};
use copy_all_chat::collect::{ClickCapture, GeminiClassifier, TurnCollector};
use copy_all_chat::config::Config;
use copy_all_chat::copy_all::{CopyAll, CopyOutcome};
use copy_all_chat::feedback::TracingFeedback;
use copy_all_chat::host::simulated::{MemoryClipboard, PageFixture, SimulatedPage};
use copy_all_chat::layout::Size;
use copy_all_chat::toolbar;
use copy_all_chat::writer::{ClipboardWriter, StdoutStrategy, SystemHostClipboard};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Copy a chat conversation to the clipboard using the page's own copy buttons
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Page fixture (JSON) describing the conversation and its copy buttons
    fixture: PathBuf,

    /// Configuration file, instead of the user override / embedded defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the assembled conversation instead of writing the clipboard
    #[arg(long)]
    dry_run: bool,
}

const DEFAULT_VIEWPORT: Size = Size {
    width: 1280.0,
    height: 800.0,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => Config::load(),
    };

    let fixture = PageFixture::load(&cli.fixture).context("Failed to load page fixture")?;
    let mut document = fixture.document;
    if toolbar::ensure_button(&mut document).is_none() {
        warn!("Toolbar not found; running without a button");
    }
    let anchor = fixture
        .toolbar
        .and_then(|geometry| toolbar::position_button(&mut document, geometry))
        .or(fixture.anchor);

    let page_clipboard: Arc<dyn HostClipboard> = if cli.dry_run {
        Arc::new(MemoryClipboard::new())
    } else {
        Arc::new(SystemHostClipboard::new())
    };
    let bridge = Arc::new(ClipboardBridge::new(page_clipboard));
    let page = Arc::new(SimulatedPage::new(bridge.clone(), fixture.copies));

    let trigger = Arc::new(ClickCapture::new(
        bridge.clone(),
        page,
        config.capture.timeout(),
    ));
    let collector = TurnCollector::new(Arc::new(GeminiClassifier), trigger);

    let writer = if cli.dry_run {
        ClipboardWriter::new(vec![Box::new(StdoutStrategy::new())])
    } else {
        ClipboardWriter::from_config(&config.clipboard, bridge.clone())
    };

    let feedback = Arc::new(TracingFeedback::new(
        config.feedback.toast_duration(),
        anchor,
        fixture.viewport.unwrap_or(DEFAULT_VIEWPORT),
    ));

    let copy_all = CopyAll::new(bridge, collector, writer, feedback);

    toolbar::set_busy(&mut document, true);
    let outcome = copy_all.run(&document).await;
    toolbar::set_busy(&mut document, false);

    match outcome {
        CopyOutcome::Copied { payload, strategy } => {
            info!(
                "Copied {} blocks ({} chars) via {}",
                payload.blocks().len(),
                payload.as_str().chars().count(),
                strategy
            );
            Ok(())
        }
        CopyOutcome::NoConversation => Ok(()),
        CopyOutcome::Busy => anyhow::bail!("A copy is already in progress"),
        CopyOutcome::Failed { error, .. } => Err(error).context("Failed to write the clipboard"),
    }
}
