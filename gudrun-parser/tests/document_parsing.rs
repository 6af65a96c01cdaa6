//! Whole-document parsing against the verified fixtures.

use gudrun_parser::gudrun::model::{
    CrossSectionSource, DensityUnits, FtMode, Geometry, NormalisationType, OutputUnits, Record,
};
use gudrun_parser::gudrun::testing;
use gudrun_parser::{parse_document, DocumentLoader, GudrunError, ParseMode, RecordKind};
use std::fs;

#[test]
fn water_fixture_populates_every_record() {
    let document = DocumentLoader::from_path(testing::fixture_path("nimrod_water.txt"))
        .unwrap()
        .parse()
        .unwrap();

    let instrument = &document.instrument;
    assert_eq!(instrument.data_file_dir, "/data/nimrod/");
    assert_eq!(instrument.spectrum_numbers_for_transmission_monitor, vec![9, 10, 11, 12]);
    assert_eq!(
        instrument.neutron_scattering_parameters_file,
        "StartupFiles/NIMROD/sears91_gudrun.dat"
    );

    assert_eq!(document.beam.beam_profile_values, vec![1.0, 1.0]);

    let normalisation = &document.normalisation;
    assert_eq!(normalisation.data_files.files, vec!["NIMROD00016702_V.raw"]);
    assert_eq!(normalisation.data_files_bg.files, vec!["NIMROD00016698_EmptyInst.raw"]);
    assert_eq!(normalisation.density.magnitude, 0.0721);
    assert_eq!(normalisation.density.units, DensityUnits::Atomic);
    assert_eq!(normalisation.temp_for_normalisation_pc, 300.0);
    assert_eq!(normalisation.geometry.flat_plate.upstream_thickness, 0.15);

    let background = &document.sample_backgrounds[0];
    assert_eq!(background.data_files.files, vec!["NIMROD00016698_EmptyInst.raw"]);

    let water = &background.samples[0];
    assert_eq!(water.name, "H2O");
    assert_eq!(water.total_cross_section_source, CrossSectionSource::Transmission);
    assert_eq!(water.ft_mode, FtMode::SubtractAverage);
    assert_eq!(water.containers[0].name, "N9 can");
    assert_eq!(water.containers[0].composition.elements[1].abundance, 3.438);

    let heavy = &background.samples[1];
    assert_eq!(heavy.ft_mode, FtMode::NoTransform);
    assert_eq!(heavy.resonance_values.len(), 1);
    assert!(heavy.exponential_values.is_empty());
    assert_eq!(heavy.normalise_to, NormalisationType::AverageSquared);
    assert_eq!(heavy.output_units, OutputUnits::InvCmSr);
    assert!(!heavy.run_this_sample);

    let water_component = document.components.get("Water").unwrap();
    assert_eq!(water_component.elements.len(), 2);
}

#[test]
fn record_tree_follows_file_order() {
    let document = parse_document(&testing::water_source(), ParseMode::Full).unwrap();
    let labels: Vec<(usize, String)> = document
        .records()
        .iter()
        .map(|record| (record.depth(), record.label()))
        .collect();
    assert_eq!(
        labels,
        vec![
            (0, "Instrument (NIMROD)".to_string()),
            (0, "Beam (FLATPLATE)".to_string()),
            (0, "Normalisation".to_string()),
            (0, "Sample Background (NIMROD00016698_EmptyInst.raw)".to_string()),
            (1, "H2O".to_string()),
            (2, "N9 can".to_string()),
            (1, "D2O".to_string()),
            (0, "Components (1)".to_string()),
        ]
    );
    assert!(matches!(document.records()[5], Record::Container(_)));
}

#[test]
fn samples_inherit_beam_geometry() {
    let source = testing::water_source()
        .replace("FLATPLATE          Sample geometry", "CYLINDRICAL          Sample geometry")
        .replace(
            "0.05  0.05          Upstream and downstream thicknesses [cm]\n\
             0.0  5.0          Angle of rotation and sample width (cm)",
            "0.0  0.3          Inner and outer radii [cm]\n\
             4.0          Sample height (cm)",
        );
    let document = parse_document(&source, ParseMode::Full).unwrap();
    let water = document.samples().next().unwrap();
    assert_eq!(water.geometry.geometry, Geometry::SameAsBeam);
    assert_eq!(water.geometry.active(document.beam.sample_geometry), Geometry::Cylindrical);
    assert_eq!(water.geometry.cylindrical.outer_radius, 0.3);
    assert_eq!(water.geometry.cylindrical.sample_height, 4.0);
}

#[test]
fn truncated_sample_reports_sample_record() {
    let source = testing::water_source();
    let cut = source.find("0.8          Minimum radius for FT").unwrap();
    let err = parse_document(&source[..cut], ParseMode::Full).unwrap_err();
    match err {
        GudrunError::Record(err) => assert_eq!(err.kind, RecordKind::Sample),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_mandatory_records_are_named() {
    let err = parse_document(&testing::beam_only_source(), ParseMode::Full).unwrap_err();
    assert_eq!(
        err.to_string(),
        "INSTRUMENT, NORMALISATION not parsed; the file supplied is most likely of an incorrect format"
    );
    assert!(parse_document(&testing::beam_only_source(), ParseMode::Template).is_ok());
}

#[test]
fn missing_data_files_are_listed() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("NIMROD00016702_V.raw"), b"").unwrap();
    let document = parse_document(&testing::water_source(), ParseMode::Full).unwrap();

    let missing = document.missing_data_files(dir.path());
    assert!(!missing.contains(&dir.path().join("NIMROD00016702_V.raw")));
    assert!(missing.contains(&dir.path().join("NIMROD00016609_Empty_N9.raw")));
    // The empty-instrument run is referenced twice but listed once.
    let empty_runs = missing
        .iter()
        .filter(|path| path.ends_with("NIMROD00016698_EmptyInst.raw"))
        .count();
    assert_eq!(empty_runs, 1);
}

#[test]
fn result_files_sit_next_to_the_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("water.txt");
    fs::write(&path, testing::water_source()).unwrap();
    let document = DocumentLoader::from_path(&path).unwrap().parse().unwrap();

    let water = document.samples().next().unwrap();
    let result = document.result_file_for(water, "gud").unwrap();
    assert_eq!(result.file_name().unwrap(), "NIMROD00016608_H2O_in_N9.gud");
    assert_eq!(result.parent().unwrap(), dir.path().canonicalize().unwrap());
}
