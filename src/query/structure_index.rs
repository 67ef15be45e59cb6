//! Lookup of the structures that reference a page.

use std::collections::HashMap;

use crate::manifest::{CanvasRef, Manifest, Structure, normalize_id};

/// Which page references of a structure count as "referencing" a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StructureMode {
    /// Only a structure's first page belongs to it.
    FirstPage,
    /// Every page a structure lists belongs to it.
    #[default]
    AllPages,
}

/// Index from page ID to the structures that reference it.
///
/// Built once per manifest so that per-page lookups do not rescan the whole
/// structure list.
#[derive(Debug)]
pub struct StructureIndex<'m> {
    structures: &'m [Structure],
    by_first_page: HashMap<String, Vec<usize>>,
    by_any_page: HashMap<String, Vec<usize>>,
}

impl<'m> StructureIndex<'m> {
    /// Indexes the manifest's flat structure list.
    #[must_use]
    pub fn new(manifest: &'m Manifest) -> Self {
        let mut by_first_page: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_any_page: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, structure) in manifest.structures.iter().enumerate() {
            if let Some(first) = structure.canvases.first().and_then(CanvasRef::id) {
                by_first_page
                    .entry(normalize_id(first))
                    .or_default()
                    .push(position);
            }
            for page_id in structure.canvases.iter().filter_map(CanvasRef::id) {
                let entries = by_any_page.entry(normalize_id(page_id)).or_default();
                if entries.last() != Some(&position) {
                    entries.push(position);
                }
            }
        }

        Self {
            structures: &manifest.structures,
            by_first_page,
            by_any_page,
        }
    }

    /// Structures referencing `page_id` under `mode`, in manifest order.
    pub fn structures_referencing(
        &self,
        page_id: &str,
        mode: StructureMode,
    ) -> impl Iterator<Item = &'m Structure> + '_ {
        let index = match mode {
            StructureMode::FirstPage => &self.by_first_page,
            StructureMode::AllPages => &self.by_any_page,
        };
        let structures = self.structures;
        index
            .get(&normalize_id(page_id))
            .into_iter()
            .flatten()
            .filter_map(move |&position| structures.get(position))
    }
}
