pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod event;
pub mod format;
pub mod gemini;
pub mod keys;
pub mod ui;
pub mod youtube;

use app::App;
use clap::Parser;
use cli::{Cli, CliCommand};
use config::load_config;
use keys::KeyStore;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Initialize tracing (logs to stderr if RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        // No subcommand or explicit `tui` → launch the interactive TUI.
        None | Some(CliCommand::Tui) => run_tui().await,
        // All other subcommands → non-interactive JSONL/text output.
        Some(cmd) => cli::run_command(cmd).await,
    }
}

/// Launch the interactive TUI.
async fn run_tui() -> color_eyre::Result<()> {
    let config = load_config();

    // A missing YouTube key is tolerated; the dashboard prompts for one.
    let keys = KeyStore::load();
    if keys.youtube_key().is_none() {
        tracing::warn!("no YouTube API key configured");
    }

    let terminal = ratatui::init();
    let result = App::new(config, keys).run(terminal).await;
    ratatui::restore();
    result
}
