//! Table-driven checks of the per-record encoding rules.

use gudrun_parser::gudrun::cursor::LineCursor;
use gudrun_parser::gudrun::model::{
    Container, CrossSectionSource, Density, DensityUnits, FtMode, Geometry, Sample,
};
use gudrun_parser::gudrun::records::{parse_record, write_record};
use gudrun_parser::gudrun::schema::Context;
use gudrun_parser::gudrun::testing;
use rstest::rstest;

fn water() -> String {
    testing::sample_block()
}

fn parse_sample(source: &str, ctx: &Context) -> Sample {
    parse_record(&mut LineCursor::new(source), ctx).unwrap()
}

#[rstest]
#[case("-0.0542", 0.0542, DensityUnits::Atomic)]
#[case("0.0542", 0.0542, DensityUnits::Chemical)]
#[case("0", 0.0, DensityUnits::Chemical)]
fn density_sign_selects_units(
    #[case] token: &str,
    #[case] magnitude: f64,
    #[case] units: DensityUnits,
) {
    let source = water().replace("-0.1          Density", &format!("{token}          Density"));
    let sample = parse_sample(&source, &Context::default());
    assert_eq!(sample.density, Density::new(magnitude, units));

    let text = write_record(&sample, &Context::default()).unwrap();
    assert_eq!(parse_sample(&text, &Context::default()).density, sample.density);
}

#[rstest]
#[case("0", 0.0, FtMode::NoTransform)]
#[case("-2.5", 2.5, FtMode::SubtractAverage)]
#[case("3.1", 3.1, FtMode::Absolute)]
fn top_hat_sign_selects_ft_mode(#[case] token: &str, #[case] width: f64, #[case] mode: FtMode) {
    let source = water().replace("-10          Top hat", &format!("{token}          Top hat"));
    let sample = parse_sample(&source, &Context::default());
    assert_eq!((sample.top_hat_w, sample.ft_mode), (width, mode));
    assert_eq!(sample.encoded_top_hat_width(), token.parse::<f64>().unwrap());
}

#[rstest]
#[case("TABLES", CrossSectionSource::Tables)]
#[case("TRANSMISSION", CrossSectionSource::Transmission)]
#[case("mydata.dcs", CrossSectionSource::File("mydata.dcs".to_string()))]
#[case("tables", CrossSectionSource::File("tables".to_string()))]
fn cross_section_tokens(#[case] token: &str, #[case] expected: CrossSectionSource) {
    let source = water().replace(
        "TRANSMISSION          Total cross section source",
        &format!("{token}          Total cross section source"),
    );
    let sample = parse_sample(&source, &Context::default());
    assert_eq!(sample.total_cross_section_source, expected);
}

#[rstest]
#[case(Geometry::FlatPlate, Geometry::Cylindrical, "Upstream and downstream thicknesses")]
#[case(Geometry::Cylindrical, Geometry::FlatPlate, "Inner and outer radii")]
#[case(Geometry::SameAsBeam, Geometry::Cylindrical, "Inner and outer radii")]
#[case(Geometry::SameAsBeam, Geometry::FlatPlate, "Upstream and downstream thicknesses")]
fn geometry_branch_follows_resolved_shape(
    #[case] own: Geometry,
    #[case] beam: Geometry,
    #[case] expected_line: &str,
) {
    let mut container = Container::new("can");
    container.geometry.geometry = own;
    let ctx = Context::default().with_beam_geometry(beam);
    let text = write_record(&container, &ctx).unwrap();
    let geometry_line = text.lines().position(|l| l.ends_with("Geometry")).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[geometry_line + 1].ends_with(&format!("{expected_line} [cm]")));
    assert!(lines[geometry_line + 3].contains("Density"));

    let parsed: Container = parse_record(&mut LineCursor::new(&text), &ctx).unwrap();
    assert_eq!(parsed.geometry.geometry, own);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(4)]
fn composition_keeps_every_row(#[case] rows: usize) {
    let symbols = ["H", "O", "C", "N"];
    let element_lines: String = symbols[..rows]
        .iter()
        .map(|s| format!("{s}  0  1.0          Sample atomic composition\n"))
        .collect();
    let source = water().replace(
        "H  0  2.0          Sample atomic composition\nO  0  1.0          Sample atomic composition\n",
        &element_lines,
    );
    let sample = parse_sample(&source, &Context::default());
    let parsed: Vec<&str> = sample
        .composition
        .elements
        .iter()
        .map(|e| e.atomic_symbol.as_str())
        .collect();
    assert_eq!(parsed, symbols[..rows].to_vec());
}
