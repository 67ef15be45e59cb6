use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use iiif_downloader_core::{DownloadEngine, HttpClient, select_pages};
use tracing::{info, warn};

use crate::app::{config, progress_manager, terminal, validation};
use crate::cli::Args;

pub(crate) async fn run_downloader(args: Args) -> Result<()> {
    let config = config::resolve_config(&args)?;
    validation::validate_destination(&config.destination)?;
    for note in validation::ineffective_flag_notes(&args) {
        warn!("{note}");
    }

    if !config.destination.exists() {
        tokio::fs::create_dir_all(&config.destination)
            .await
            .with_context(|| {
                format!(
                    "could not create destination '{}'",
                    config.destination.display()
                )
            })?;
        info!(path = %config.destination.display(), "Created destination directory");
    }

    let client = HttpClient::new_with_timeouts(
        config.http_timeouts.connect_secs,
        config.http_timeouts.read_secs,
    );

    info!(url = %config.manifest_url, "Loading manifest");
    let manifest = client
        .fetch_manifest(&config.manifest_url)
        .await
        .with_context(|| format!("could not load manifest '{}'", config.manifest_url))?;

    let pages = select_pages(&manifest, &config.selection, &mut rand::thread_rng())?;
    if pages.is_empty() {
        warn!("No pages matched the selection; nothing to download");
        return Ok(());
    }
    info!(
        pages = pages.len(),
        available = manifest.pages().len(),
        "Selected pages"
    );

    let use_spinner = terminal::should_use_spinner(
        io::stderr().is_terminal(),
        args.quiet,
        terminal::is_dumb_terminal(),
    );
    let (events, progress_handle) = progress_manager::spawn_progress_ui(use_spinner);

    let mut engine =
        DownloadEngine::new(&client, config.destination.as_path()).with_ocr(config.download_ocr);
    if let Some(events) = events {
        engine = engine.with_events(events);
    }
    let result = engine.run(&pages).await;
    drop(engine);
    if let Some(handle) = progress_handle {
        let _ = handle.await;
    }
    let stats = result?;

    info!(
        images = stats.images(),
        alto = stats.ocr(),
        alto_missing = stats.ocr_missing(),
        bytes = stats.bytes(),
        destination = %config.destination.display(),
        "Download complete"
    );
    if config.download_ocr && stats.ocr_missing() > 0 {
        warn!(
            pages = stats.ocr_missing(),
            "Some pages have no ALTO file; only their images were downloaded"
        );
    }
    Ok(())
}
