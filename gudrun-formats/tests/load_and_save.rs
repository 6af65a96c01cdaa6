//! Loading and saving through the registry, on disk.

use gudrun_formats::{load, save, FormatError, FormatRegistry};
use gudrun_parser::gudrun::testing;
use gudrun_parser::GudrunError;
use rstest::rstest;
use std::fs;

#[test]
fn fixture_loads_as_txt() {
    let registry = FormatRegistry::with_defaults();
    let (document, format) = load(&registry, testing::fixture_path("nimrod_water.txt")).unwrap();
    assert_eq!(format, "txt");
    assert_eq!(document.samples().count(), 2);
    assert!(document.path.is_some());
}

#[rstest]
#[case("water.yaml", "yaml")]
#[case("water.yml", "yaml")]
#[case("water.json", "json")]
#[case("water.txt", "txt")]
#[case("water.gudrun", "txt")]
fn saved_documents_load_back(#[case] file_name: &str, #[case] format: &str) {
    let registry = FormatRegistry::with_defaults();
    let (document, _) = load(&registry, testing::fixture_path("nimrod_water.txt")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(file_name);
    save(&registry, &document, &path, Some(format)).unwrap();

    let (reloaded, detected) = load(&registry, &path).unwrap();
    assert_eq!(detected, format);
    assert_eq!(reloaded.sample_backgrounds, document.sample_backgrounds);
    assert_eq!(reloaded.normalisation, document.normalisation);
    assert_eq!(reloaded.components, document.components);
    assert_eq!(
        reloaded.instrument.gudrun_input_file_dir,
        dir.path().canonicalize().unwrap().display().to_string()
    );
}

#[test]
fn structured_content_wins_over_txt_extension() {
    let registry = FormatRegistry::with_defaults();
    let document = testing::sample_document();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("water.txt");
    save(&registry, &document, &path, Some("yaml")).unwrap();

    let (reloaded, detected) = load(&registry, &path).unwrap();
    assert_eq!(detected, "yaml");
    assert_eq!(reloaded.sample_backgrounds, document.sample_backgrounds);
}

#[test]
fn save_picks_format_from_extension() {
    let registry = FormatRegistry::with_defaults();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("water.json");
    save(&registry, &testing::sample_document(), &path, None).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.trim_start().starts_with('{'));
}

#[test]
fn save_without_known_extension_needs_a_format() {
    let registry = FormatRegistry::with_defaults();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("water.out");

    let result = save(&registry, &testing::sample_document(), &path, None);
    assert!(matches!(result, Err(FormatError::FormatNotFound(_))));
    assert!(!path.exists());
}

#[test]
fn missing_file_is_an_invalid_path() {
    let registry = FormatRegistry::with_defaults();
    let result = load(&registry, "/no/such/dir/water.txt");
    assert!(matches!(
        result,
        Err(FormatError::Parse(GudrunError::InvalidPath(_)))
    ));
}
