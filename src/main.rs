//! CLI entry point for the IIIF downloader.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::{debug, info};

mod app;
mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Without any arguments, show usage and exit successfully
    if std::env::args_os().len() <= 1 {
        Args::command().print_help()?;
        println!();
        return Ok(());
    }

    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = app::config::resolve_default_log_level(args.verbose, args.quiet);
    app::terminal::init_tracing(default_level);

    debug!(?args, "CLI arguments parsed");
    info!("IIIF downloader starting");

    app::runtime::run_downloader(args).await
}
