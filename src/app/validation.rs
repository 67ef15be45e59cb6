use std::path::Path;

use anyhow::{Result, bail};

use crate::cli::{Args, StructureModeArg};

pub(crate) fn validate_destination(destination: &Path) -> Result<()> {
    if destination.exists() && !destination.is_dir() {
        bail!(
            "What: Invalid destination\nWhy: '{}' exists and is not a directory\nFix: Pass a directory path with --destination.",
            destination.display()
        );
    }
    Ok(())
}

/// Flags that were given but cannot change what gets downloaded.
pub(crate) fn ineffective_flag_notes(args: &Args) -> Vec<&'static str> {
    let mut notes = Vec::new();
    let targeted = !args.include_structure.is_empty();
    if args.random_images && args.maximum_images.is_none() && !targeted {
        notes.push("--random-images has no effect without --maximum-images; pages keep manifest order");
    }
    if args.structure_mode != StructureModeArg::All
        && args.include_structure.is_empty()
        && args.exclude_structure.is_empty()
    {
        notes.push("--structure-mode has no effect without --include-structure or --exclude-structure");
    }
    notes
}
