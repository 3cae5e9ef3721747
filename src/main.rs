// Courtside - badminton coaching roster in the terminal
//
// Coaches keep training sessions and the students attending them. Both lists
// share one machinery:
// - Filter engine: committed selections narrow the records
// - Table: columns, sorting and cell formatting over the filtered rows
// - Record editor: form controls bound to a draft, validated on save
// - TUI (ratatui): routes, layered key dispatch, responsive layout
// - CLI (clap): print a list or manage the config without the TUI

mod cli;
mod config;
mod editor;
mod filter;
mod logging;
mod mock;
mod model;
mod pages;
mod report;
mod route;
mod store;
mod table;
mod theme;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, CliOutcome};
use config::Config;
use logging::{LogBuffer, LogSink};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Subcommands print to the terminal, so their logs go to stderr.
    // The TUI owns the screen and captures logs into the panel buffer.
    let log_buffer = LogBuffer::with_capacity(config.logging.buffer_entries);
    let sink = if cli.command.is_some() {
        LogSink::Stderr
    } else {
        LogSink::Tui
    };
    // Held for the program's lifetime so file logs flush
    let _file_guard = logging::init(&config.logging, sink, &log_buffer);

    // Extract bundled themes on first run
    theme::ensure_themes_extracted();

    match cli::handle_cli(cli, &config)? {
        CliOutcome::Handled => Ok(()),
        CliOutcome::RunTui { route } => {
            let start = route.unwrap_or_else(|| config.start_route.clone());
            tracing::info!(theme = %config.theme, start = %start, "Starting courtside");
            tui::run_tui(config, log_buffer, start).await
        }
    }
}
