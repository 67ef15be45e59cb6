//! Integration tests for page selection and resolution against a full manifest.
//!
//! The fixture is an eight-page monograph with two chapters, two figures, a
//! title page, a register and an empty chapter range.

use std::collections::HashSet;

use iiif_downloader_core::{
    Canvas, LabelValueCriterion, Manifest, SelectionError, SelectionOptions, StructureMode,
    resolve_page, select_pages,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const FIXTURE: &str = include_str!("fixtures/manifest.json");

fn manifest() -> Manifest {
    Manifest::from_json(FIXTURE).expect("fixture manifest should parse")
}

fn criterion(token: &str) -> LabelValueCriterion {
    token.parse().expect("criterion should parse")
}

/// Page numbers (1-based sequence positions) of the selected pages.
fn numbers(pages: &[&Canvas]) -> Vec<u32> {
    pages
        .iter()
        .map(|page| {
            let segment = page
                .id
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .expect("page id has a segment");
            segment.parse().expect("page id ends in a number")
        })
        .collect()
}

fn select(options: &SelectionOptions) -> Result<Vec<u32>, SelectionError> {
    let manifest = manifest();
    let mut rng = StdRng::seed_from_u64(7);
    select_pages(&manifest, options, &mut rng).map(|pages| numbers(&pages))
}

#[test]
fn test_fixture_parses_all_pages_and_structures() {
    let manifest = manifest();
    assert_eq!(manifest.pages().len(), 8);
    assert_eq!(manifest.structures.len(), 8);
}

#[test]
fn test_no_criteria_selects_whole_sequence_in_order() {
    let selected = select(&SelectionOptions::default()).unwrap();
    assert_eq!(selected, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_include_chapters_matches_scalar_and_multilingual_metadata() {
    let options = SelectionOptions {
        include: vec![criterion("Strukturtyp::Kapitel")],
        ..SelectionOptions::default()
    };
    assert_eq!(select(&options).unwrap(), vec![2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_include_by_second_language_position() {
    let options = SelectionOptions {
        include: vec![criterion("Structure type::Chapter")],
        ..SelectionOptions::default()
    };
    assert_eq!(select(&options).unwrap(), vec![2, 3, 4]);
}

#[test]
fn test_include_mixed_language_pair_does_not_match() {
    let options = SelectionOptions {
        include: vec![criterion("Strukturtyp::Chapter")],
        ..SelectionOptions::default()
    };
    assert!(select(&options).unwrap().is_empty());
}

#[test]
fn test_include_chapters_exclude_figures() {
    let options = SelectionOptions {
        include: vec![criterion("Strukturtyp::Kapitel")],
        exclude: vec![criterion("Strukturtyp::Abbildung")],
        ..SelectionOptions::default()
    };
    assert_eq!(select(&options).unwrap(), vec![2, 4, 5, 7]);
}

#[test]
fn test_first_page_mode_takes_chapter_openings() {
    let options = SelectionOptions {
        include: vec![criterion("Strukturtyp::Kapitel")],
        exclude: vec![criterion("Strukturtyp::Abbildung")],
        structure_mode: StructureMode::FirstPage,
        ..SelectionOptions::default()
    };
    assert_eq!(select(&options).unwrap(), vec![2, 5]);
}

#[test]
fn test_several_include_criteria_follow_structure_order() {
    let options = SelectionOptions {
        include: vec![
            criterion("Strukturtyp::Register"),
            criterion("Strukturtyp::Titelseite"),
        ],
        ..SelectionOptions::default()
    };
    assert_eq!(select(&options).unwrap(), vec![1, 8]);
}

#[test]
fn test_excluding_whole_work_depends_on_mode() {
    let all_pages = SelectionOptions {
        exclude: vec![criterion("Strukturtyp::Monographie")],
        ..SelectionOptions::default()
    };
    assert!(select(&all_pages).unwrap().is_empty());

    let first_page = SelectionOptions {
        structure_mode: StructureMode::FirstPage,
        ..all_pages
    };
    assert_eq!(select(&first_page).unwrap(), vec![2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_cap_truncates_structure_selection() {
    let options = SelectionOptions {
        include: vec![criterion("Strukturtyp::Kapitel")],
        cap: Some(2),
        ..SelectionOptions::default()
    };
    assert_eq!(select(&options).unwrap(), vec![2, 3]);
}

#[test]
fn test_cap_beyond_structure_selection_is_error() {
    let options = SelectionOptions {
        include: vec![criterion("Strukturtyp::Kapitel")],
        cap: Some(10),
        ..SelectionOptions::default()
    };
    assert_eq!(
        select(&options).unwrap_err(),
        SelectionError::CapExceedsSelectable {
            requested: 10,
            available: 6
        }
    );
}

#[test]
fn test_random_sample_is_distinct_and_reproducible_with_seed() {
    let options = SelectionOptions {
        exclude: vec![criterion("Strukturtyp::Register")],
        shuffle: true,
        cap: Some(3),
        ..SelectionOptions::default()
    };
    let first = select(&options).unwrap();
    let second = select(&options).unwrap();
    assert_eq!(first, second, "same seed should give the same sample");
    assert_eq!(first.len(), 3);
    let distinct: HashSet<u32> = first.iter().copied().collect();
    assert_eq!(distinct.len(), 3, "sample should not repeat pages");
    assert!(!first.contains(&8), "excluded page should never be sampled");
}

#[test]
fn test_shuffled_chapters_keep_the_same_pages() {
    let options = SelectionOptions {
        include: vec![criterion("Strukturtyp::Kapitel")],
        shuffle: true,
        ..SelectionOptions::default()
    };
    let mut selected = select(&options).unwrap();
    selected.sort_unstable();
    assert_eq!(selected, vec![2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_resolve_rewrites_scaled_image_request_to_max() {
    let manifest = manifest();
    let resources = resolve_page(&manifest.pages()[0], true).unwrap();
    assert_eq!(
        resources.image_url,
        "https://images.example.org/iiif/PPN123456789/00000001.tif/full/max/0/default.jpg"
    );
    assert_eq!(resources.image_file_name(), "00000001.jpg");
    assert_eq!(
        resources.ocr.as_ref().map(|link| link.url()),
        Some("https://digital.example.org/alto/PPN123456789/00000001.xml")
    );
}

#[test]
fn test_resolve_service_only_page_without_alto() {
    let manifest = manifest();
    let resources = resolve_page(&manifest.pages()[7], true).unwrap();
    assert_eq!(
        resources.image_url,
        "https://images.example.org/iiif/PPN123456789/00000008.tif/full/full/0/default.jpg"
    );
    assert_eq!(resources.basename, "00000008");
    assert!(resources.ocr.is_none());
}
