//! Turns parsed CLI arguments into the settings a run works from.

use std::path::PathBuf;

use anyhow::{Context, Result};
use iiif_downloader_core::{SelectionOptions, StructureMode};

use crate::cli::{Args, StructureModeArg};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HttpTimeoutSettings {
    pub(crate) connect_secs: u64,
    pub(crate) read_secs: u64,
}

/// Everything a download run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub(crate) struct RunConfig {
    pub(crate) manifest_url: String,
    pub(crate) destination: PathBuf,
    pub(crate) selection: SelectionOptions,
    pub(crate) download_ocr: bool,
    pub(crate) http_timeouts: HttpTimeoutSettings,
}

impl From<StructureModeArg> for StructureMode {
    fn from(value: StructureModeArg) -> Self {
        match value {
            StructureModeArg::FirstPage => Self::FirstPage,
            StructureModeArg::All => Self::AllPages,
        }
    }
}

pub(crate) fn resolve_config(args: &Args) -> Result<RunConfig> {
    let manifest_url = args.manifest.trim();
    url::Url::parse(manifest_url)
        .with_context(|| format!("--manifest is not a valid URL: '{manifest_url}'"))?;

    let cap = args
        .maximum_images
        .map(usize::try_from)
        .transpose()
        .context("--maximum-images does not fit this platform")?;

    Ok(RunConfig {
        manifest_url: manifest_url.to_string(),
        destination: args.destination.clone(),
        selection: SelectionOptions {
            include: args.include_structure.clone(),
            exclude: args.exclude_structure.clone(),
            structure_mode: args.structure_mode.into(),
            shuffle: args.random_images,
            cap,
        },
        download_ocr: args.download_alto,
        http_timeouts: HttpTimeoutSettings {
            connect_secs: args.connect_timeout,
            read_secs: args.read_timeout,
        },
    })
}

pub(crate) fn resolve_default_log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
