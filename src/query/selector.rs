//! Page selection: turns a manifest plus include/exclude criteria into the
//! ordered list of pages to download.
//!
//! Two modes exist:
//!
//! - **Structure-targeted** (include criteria given): pages come from the
//!   structures whose metadata matches an include criterion, in structure
//!   order. Duplicates are kept.
//! - **Page-set** (no include criteria): pages come from the primary
//!   sequence in display order.
//!
//! In both modes a page is dropped if any structure referencing it (under
//! the chosen [`StructureMode`]) carries excluded metadata.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument};

use crate::manifest::{Canvas, Manifest, Structure, normalize_id};

use super::criterion::LabelValueCriterion;
use super::error::SelectionError;
use super::matcher::metadata_matches;
use super::structure_index::{StructureIndex, StructureMode};

/// User-facing selection options.
#[derive(Debug, Clone, Default)]
pub struct SelectionOptions {
    /// Structures to take pages from. Empty selects from the whole sequence.
    pub include: Vec<LabelValueCriterion>,
    /// Structures whose pages must not be selected.
    pub exclude: Vec<LabelValueCriterion>,
    pub structure_mode: StructureMode,
    /// Randomize the order (structure-targeted) or sample (page-set).
    pub shuffle: bool,
    /// Maximum number of pages.
    pub cap: Option<usize>,
}

/// Selects the pages to download, in download order.
///
/// `rng` drives shuffling and sampling; pass `rand::thread_rng()` in
/// production and a seeded generator in tests.
///
/// # Errors
///
/// - [`SelectionError::NoSequence`] if the manifest has no sequence.
/// - [`SelectionError::CapExceedsSelectable`] if `cap` is larger than the
///   number of pages left after filtering, outside of page-set sampling.
#[instrument(skip_all, fields(
    include = options.include.len(),
    exclude = options.exclude.len(),
    mode = ?options.structure_mode,
    shuffle = options.shuffle,
    cap = ?options.cap,
))]
pub fn select_pages<'m, R>(
    manifest: &'m Manifest,
    options: &SelectionOptions,
    rng: &mut R,
) -> Result<Vec<&'m Canvas>, SelectionError>
where
    R: Rng + ?Sized,
{
    if manifest.primary_sequence().is_none() {
        return Err(SelectionError::NoSequence);
    }

    let filter = ExclusionFilter {
        index: StructureIndex::new(manifest),
        exclude: &options.exclude,
        mode: options.structure_mode,
    };

    let selected = if options.include.is_empty() {
        select_from_sequence(manifest, options, &filter, rng)?
    } else {
        select_from_structures(manifest, options, &filter, rng)?
    };

    info!(selected = selected.len(), "Selected pages");
    Ok(selected)
}

struct ExclusionFilter<'m, 'o> {
    index: StructureIndex<'m>,
    exclude: &'o [LabelValueCriterion],
    mode: StructureMode,
}

impl ExclusionFilter<'_, '_> {
    fn keep(&self, page: &Canvas) -> bool {
        if self.exclude.is_empty() {
            return true;
        }
        let excluded = self
            .index
            .structures_referencing(&page.id, self.mode)
            .any(|structure| structure_matches(structure, self.exclude));
        if excluded {
            debug!(page = %page.id, "page excluded by structure metadata");
        }
        !excluded
    }
}

fn structure_matches(structure: &Structure, criteria: &[LabelValueCriterion]) -> bool {
    structure
        .metadata
        .iter()
        .any(|meta| metadata_matches(meta, criteria))
}

fn select_from_structures<'m, R>(
    manifest: &'m Manifest,
    options: &SelectionOptions,
    filter: &ExclusionFilter<'m, '_>,
    rng: &mut R,
) -> Result<Vec<&'m Canvas>, SelectionError>
where
    R: Rng + ?Sized,
{
    let pages_by_id: HashMap<String, &'m Canvas> = manifest
        .pages()
        .iter()
        .map(|page| (normalize_id(&page.id), page))
        .collect();

    let matched: Vec<&Structure> = manifest
        .structures
        .iter()
        .filter(|structure| structure_matches(structure, &options.include))
        .collect();
    debug!(matched = matched.len(), "structures matching include criteria");

    let mut selected: Vec<&'m Canvas> = matched
        .into_iter()
        .flat_map(|structure| {
            let refs = structure.canvases.as_slice();
            match options.structure_mode {
                StructureMode::FirstPage => &refs[..refs.len().min(1)],
                StructureMode::AllPages => refs,
            }
        })
        .filter_map(|canvas_ref| {
            let Some(page_id) = canvas_ref.id() else {
                debug!("skipping structure reference without a page ID");
                return None;
            };
            let page = pages_by_id.get(&normalize_id(page_id)).copied();
            if page.is_none() {
                debug!(page = %page_id, "structure page not found in sequence");
            }
            page
        })
        .filter(|page| filter.keep(page))
        .collect();

    if options.shuffle {
        selected.shuffle(rng);
    }
    if let Some(cap) = options.cap {
        ensure_cap_fits(cap, selected.len())?;
        selected.truncate(cap);
    }
    Ok(selected)
}

fn select_from_sequence<'m, R>(
    manifest: &'m Manifest,
    options: &SelectionOptions,
    filter: &ExclusionFilter<'m, '_>,
    rng: &mut R,
) -> Result<Vec<&'m Canvas>, SelectionError>
where
    R: Rng + ?Sized,
{
    let candidates: Vec<&'m Canvas> = manifest
        .pages()
        .iter()
        .filter(|page| filter.keep(page))
        .collect();

    match options.cap {
        Some(cap) if options.shuffle && cap < candidates.len() => {
            Ok(sample_without_replacement(&candidates, cap, rng))
        }
        // Nothing left to sample from; every candidate goes, in sequence order.
        Some(_) if options.shuffle => Ok(candidates),
        Some(cap) => {
            ensure_cap_fits(cap, candidates.len())?;
            Ok(candidates.into_iter().take(cap).collect())
        }
        None => Ok(candidates),
    }
}

/// Draws `count` distinct entries in draw order. Requires `count < items.len()`.
fn sample_without_replacement<'m, R>(
    items: &[&'m Canvas],
    count: usize,
    rng: &mut R,
) -> Vec<&'m Canvas>
where
    R: Rng + ?Sized,
{
    let mut drawn = HashSet::with_capacity(count);
    let mut sampled = Vec::with_capacity(count);
    while sampled.len() < count {
        let position = rng.gen_range(0..items.len());
        if drawn.insert(position) {
            sampled.push(items[position]);
        }
    }
    sampled
}

fn ensure_cap_fits(cap: usize, available: usize) -> Result<(), SelectionError> {
    if cap > available {
        return Err(SelectionError::CapExceedsSelectable {
            requested: cap,
            available,
        });
    }
    Ok(())
}
