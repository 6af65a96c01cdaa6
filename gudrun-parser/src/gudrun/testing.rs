//! Test support
//!
//! Gudrun files are easy to get subtly wrong by hand: one missing line shifts every
//! field after it. Tests should therefore start from the verified fixtures under
//! `tests/fixtures/` rather than ad-hoc strings, and cut the record they need out of a
//! full document with [`block`]:
//!
//!     let source = testing::water_source();
//!     let beam = testing::block(&source, "BEAM");
//!
//! Fixtures:
//!
//!     nimrod_water.txt                 NIMROD water run: one background, two samples
//!                                      (the first in a container), one component
//!     nimrod_instrument_template.txt   Instrument template with good-detector threshold
//!     container_n9.txt                 Container template, integer mass numbers and no
//!                                      environment line

use crate::gudrun::model::{
    Component, Container, DataFiles, Document, Element, Geometry, Sample, SampleBackground,
    WeightedComponent,
};
use std::path::PathBuf;

const WATER: &str = include_str!("../../tests/fixtures/nimrod_water.txt");
const INSTRUMENT_TEMPLATE: &str =
    include_str!("../../tests/fixtures/nimrod_instrument_template.txt");
const CONTAINER_TEMPLATE: &str = include_str!("../../tests/fixtures/container_n9.txt");

/// Absolute path of a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn water_source() -> String {
    WATER.to_string()
}

pub fn instrument_template() -> String {
    INSTRUMENT_TEMPLATE.to_string()
}

pub fn container_template() -> String {
    CONTAINER_TEMPLATE.to_string()
}

/// The lines of the first record whose header starts with `header`, through its closing
/// brace. Empty when there is no such record.
pub fn block(source: &str, header: &str) -> String {
    let mut lines = source
        .lines()
        .skip_while(|line| !(line.starts_with(header) && line.contains('{')));
    let mut record = Vec::new();
    for line in lines.by_ref() {
        record.push(line);
        if line.starts_with('}') {
            break;
        }
    }
    record.join("\n")
}

pub fn instrument_block() -> String {
    block(WATER, "INSTRUMENT")
}

pub fn sample_block() -> String {
    block(WATER, "SAMPLE H2O")
}

/// A file holding nothing but a cylindrical Beam.
pub fn beam_only_source() -> String {
    block(WATER, "BEAM").replace(
        "FLATPLATE          Sample geometry",
        "CYLINDRICAL          Sample geometry",
    )
}

/// A small document built in code: one background with a running sample in a
/// container, a second sample that does not run, and one weighted component.
pub fn sample_document() -> Document {
    let mut document = Document::default();
    document.normalisation.data_files =
        DataFiles::new("NORMALISATION").with_files(["NIMROD00016702_V.raw"]);
    document.normalisation.composition.elements = vec![Element::new("V", 0, 1.0)];

    document
        .components
        .insert(Component::new("Water").with_elements(vec![
            Element::new("H", 0, 2.0),
            Element::new("O", 0, 1.0),
        ]));

    let mut water = Sample::new("H2O, 298K");
    water.data_files = DataFiles::new("H2O, 298K").with_files(["NIMROD00016608.raw"]);
    water.composition.weighted_components = vec![WeightedComponent {
        component: "Water".to_string(),
        ratio: 1.0,
    }];
    water.composition.elements = vec![Element::new("H", 0, 2.0), Element::new("O", 0, 1.0)];
    let mut can = Container::new("N9 can");
    can.data_files = DataFiles::new("N9 can").with_files(["NIMROD00016609.raw"]);
    can.composition.elements = vec![Element::new("Ti", 0, 7.16), Element::new("Zr", 0, 3.438)];
    can.geometry.geometry = Geometry::FlatPlate;
    water.containers.push(can);

    let mut ice = Sample::new("ice");
    ice.data_files = DataFiles::new("ice").with_files(["NIMROD00016620.raw"]);
    ice.run_this_sample = false;

    document.sample_backgrounds.push(SampleBackground {
        data_files: DataFiles::new("SAMPLE BACKGROUND").with_files(["NIMROD00016698.raw"]),
        samples: vec![water, ice],
        ..SampleBackground::default()
    });
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_cuts_one_record() {
        let beam = block(WATER, "BEAM");
        assert!(beam.starts_with("BEAM          {"));
        assert!(beam.ends_with('}'));
        assert_eq!(beam.lines().count(), 15);
    }

    #[test]
    fn missing_block_is_empty() {
        assert!(block(WATER, "NOTHING").is_empty());
    }

    #[test]
    fn fixtures_exist_on_disk() {
        assert!(fixture_path("nimrod_water.txt").exists());
    }
}
