//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use iiif_downloader_core::LabelValueCriterion;
use iiif_downloader_core::download::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};

/// Download page images and ALTO files linked in a IIIF manifest.
///
/// Pages can be selected by the metadata of the structures (table of
/// contents entries) that contain them, capped, and sampled at random.
#[derive(Parser, Debug)]
#[command(name = "iiif-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// The manifest URL to parse and download from
    #[arg(short, long, value_name = "URL")]
    pub manifest: String,

    /// The destination folder to download to (created if missing)
    #[arg(short, long, value_name = "DIR")]
    pub destination: PathBuf,

    /// Structure to include, e.g. "Strukturtyp::Abbildung" (repeatable)
    #[arg(
        short = 'i',
        long = "include-structure",
        alias = "include_structure",
        value_name = "LABEL::VALUE"
    )]
    pub include_structure: Vec<LabelValueCriterion>,

    /// Structure to exclude, e.g. "Strukturtyp::Abbildung" (repeatable)
    #[arg(
        short = 'e',
        long = "exclude-structure",
        alias = "exclude_structure",
        value_name = "LABEL::VALUE"
    )]
    pub exclude_structure: Vec<LabelValueCriterion>,

    /// Which pages of a structure belong to it
    #[arg(
        long,
        alias = "structure_mode",
        value_enum,
        default_value_t = StructureModeArg::All
    )]
    pub structure_mode: StructureModeArg,

    /// The maximum number of images to download
    #[arg(
        short = 'n',
        long,
        alias = "maximum_images",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub maximum_images: Option<u32>,

    /// Select random images
    #[arg(short = 'r', long, alias = "random_images")]
    pub random_images: bool,

    /// Download ALTO (if present)
    #[arg(short = 'a', long, alias = "download_alto")]
    pub download_alto: bool,

    /// HTTP connect timeout in seconds (1-600)
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=600))]
    pub connect_timeout: u64,

    /// HTTP read timeout in seconds (1-3600)
    #[arg(long, default_value_t = READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// `--structure-mode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StructureModeArg {
    /// Only the first page of each structure
    #[value(name = "firstpage")]
    FirstPage,
    /// Every page of each structure
    All,
}
