//! Line groups that recur across record kinds: headers, data-file lists, compositions,
//! the geometry block, density and cross-section source.

use crate::gudrun::cursor::LineCursor;
use crate::gudrun::error::{LineError, SerializeError};
use crate::gudrun::model::{
    is_known_symbol, Composition, CrossSectionSource, DataFiles, Density, Element, Geometry,
    GeometryBearing,
};
use crate::gudrun::scalars;
use crate::gudrun::schema::{
    read_float, read_list, read_word, render, word, Context, Field, LineWriter, COMPOSITION_END,
    SPC2, SPC5,
};

/// Consume `KEYWORD ... {` if it is the next line, then at most one blank line.
pub fn consume_keyword_header(cursor: &mut LineCursor<'_>, keyword: &str) {
    if cursor
        .peek()
        .is_some_and(|line| line.trim_start().starts_with(keyword) && line.contains('{'))
    {
        cursor.skip(1);
    }
    cursor.skip_blank();
}

/// Recover the user-given name from a `KEYWORD name {` line.
pub fn record_name(line: &str, keyword: &str) -> String {
    let inner = line.trim().trim_end_matches('{').trim();
    let name = inner.strip_prefix(keyword).unwrap_or(inner).trim();
    if name.is_empty() {
        keyword.to_string()
    } else {
        name.to_string()
    }
}

/// Read a `KEYWORD name {` line and the blank line after it.
pub fn read_named_header(cursor: &mut LineCursor<'_>, keyword: &str) -> Result<String, LineError> {
    let name = record_name(cursor.pop()?, keyword);
    cursor.skip_blank();
    Ok(name)
}

/// Write a `KEYWORD name {` line. A record named after its keyword is written bare.
pub fn write_named_header(
    writer: &mut LineWriter,
    keyword: &str,
    name: &str,
) -> Result<(), SerializeError> {
    let readable = !name.is_empty()
        && name.trim() == name
        && !name.contains(['{', '}'])
        && !name.starts_with("BACKGROUND")
        && !name.contains("SAMPLE BACKGROUND");
    if !readable {
        return Err(SerializeError::InvalidToken {
            field: "record name",
            value: name.to_string(),
        });
    }
    if name == keyword {
        writer.open(keyword);
    } else {
        writer.open(&format!("{keyword} {name}"));
    }
    Ok(())
}

/// `count  period` followed by one line per file.
pub fn read_data_files(
    cursor: &mut LineCursor<'_>,
    owner: &str,
) -> Result<(u32, DataFiles), LineError> {
    let line = cursor.pop()?;
    let count = scalars::nth_unsigned(line, 0)?;
    let period = scalars::nth_unsigned(line, 1)?;
    let files = (0..count)
        .map(|_| read_word(cursor))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((period, DataFiles::new(owner).with_files(files)))
}

pub fn write_data_files(
    writer: &mut LineWriter,
    period: u32,
    files: &DataFiles,
    label: &str,
) -> Result<(), SerializeError> {
    writer.line(
        [render(&files.len()), render(&period)],
        "Number of files and period number",
    );
    for file in files.iter() {
        writer.line([word("data file", file)?], &format!("{label} data files"));
    }
    Ok(())
}

/// Composition rows `symbol  massNumber  abundance` up to the composition sentinel.
///
/// Mass numbers are accepted in integer and float spelling.
pub fn read_composition(cursor: &mut LineCursor<'_>) -> Result<Vec<Element>, LineError> {
    read_list(cursor, COMPOSITION_END, |line| {
        Ok(Element::new(
            scalars::first_word(line)?,
            scalars::nth_mass_number(line, 1)?,
            scalars::nth_float(line, 2)?,
        ))
    })
}

pub fn write_composition(
    writer: &mut LineWriter,
    composition: &Composition,
    label: &str,
) -> Result<(), SerializeError> {
    let comment = format!("{label} atomic composition");
    for element in &composition.elements {
        if !is_known_symbol(&element.atomic_symbol) {
            return Err(SerializeError::UnknownElement {
                owner: composition.name.clone(),
                symbol: element.atomic_symbol.clone(),
            });
        }
        if element.abundance < 0.0 {
            return Err(SerializeError::NegativeAbundance {
                owner: composition.name.clone(),
                symbol: element.atomic_symbol.clone(),
                abundance: element.abundance,
            });
        }
        writer.line(
            [
                element.atomic_symbol.clone(),
                render(&element.mass_number),
                render(&element.abundance),
            ],
            &comment,
        );
    }
    writer.raw(format!(
        "*{SPC2}0{SPC2}0{SPC5}* 0 0 to specify end of composition input"
    ));
    Ok(())
}

pub fn read_density(cursor: &mut LineCursor<'_>) -> Result<Density, LineError> {
    read_float(cursor).map(Density::from_signed)
}

pub fn write_density(writer: &mut LineWriter, density: Density) {
    writer.value(
        &density.signed(),
        &format!("Density {}?", density.units.label()),
    );
}

pub fn read_cross_section_source(
    cursor: &mut LineCursor<'_>,
) -> Result<CrossSectionSource, LineError> {
    read_word(cursor).map(|token| CrossSectionSource::from_token(&token))
}

pub fn write_cross_section_source(
    writer: &mut LineWriter,
    source: &CrossSectionSource,
) -> Result<(), SerializeError> {
    writer.line(
        [word("total cross section source", source.token())?],
        "Total cross section source",
    );
    Ok(())
}

pub fn read_geometry(cursor: &mut LineCursor<'_>) -> Result<Geometry, LineError> {
    let line = cursor.pop()?;
    let token = scalars::first_word(line)?;
    Geometry::from_token(token).ok_or_else(|| LineError::UnknownVariant {
        token: token.to_string(),
        expected: "geometry",
        line: line.to_string(),
    })
}

fn is_flat_plate<T: GeometryBearing>(record: &T, ctx: &Context) -> bool {
    record.geometry_block().active(ctx.beam_geometry) == Geometry::FlatPlate
}

fn is_cylindrical<T: GeometryBearing>(record: &T, ctx: &Context) -> bool {
    record.geometry_block().active(ctx.beam_geometry) == Geometry::Cylindrical
}

/// The geometry token followed by the two lines of whichever shape is active.
pub fn geometry_fields<T: GeometryBearing>() -> Vec<Field<T>> {
    vec![
        Field::<T>::new(
            "geometry",
            |c, r, _| {
                r.geometry_block_mut().geometry = read_geometry(c)?;
                Ok(())
            },
            |r, _, w| {
                w.line([r.geometry_block().geometry.token()], "Geometry");
                Ok(())
            },
        ),
        Field::<T>::new(
            "upstream and downstream thicknesses",
            |c, r, _| {
                let line = c.pop()?;
                let flat = &mut r.geometry_block_mut().flat_plate;
                flat.upstream_thickness = scalars::nth_float(line, 0)?;
                flat.downstream_thickness = scalars::nth_float(line, 1)?;
                Ok(())
            },
            |r, _, w| {
                let flat = &r.geometry_block().flat_plate;
                w.line(
                    [
                        render(&flat.upstream_thickness),
                        render(&flat.downstream_thickness),
                    ],
                    "Upstream and downstream thicknesses [cm]",
                );
                Ok(())
            },
        )
        .when(is_flat_plate::<T>),
        Field::<T>::new(
            "angle of rotation and sample width",
            |c, r, _| {
                let line = c.pop()?;
                let flat = &mut r.geometry_block_mut().flat_plate;
                flat.angle_of_rotation = scalars::nth_float(line, 0)?;
                flat.sample_width = scalars::nth_float(line, 1)?;
                Ok(())
            },
            |r, _, w| {
                let flat = &r.geometry_block().flat_plate;
                w.line(
                    [render(&flat.angle_of_rotation), render(&flat.sample_width)],
                    "Angle of rotation and sample width (cm)",
                );
                Ok(())
            },
        )
        .when(is_flat_plate::<T>),
        Field::<T>::new(
            "inner and outer radii",
            |c, r, _| {
                let line = c.pop()?;
                let cylinder = &mut r.geometry_block_mut().cylindrical;
                cylinder.inner_radius = scalars::nth_float(line, 0)?;
                cylinder.outer_radius = scalars::nth_float(line, 1)?;
                Ok(())
            },
            |r, _, w| {
                let cylinder = &r.geometry_block().cylindrical;
                w.line(
                    [
                        render(&cylinder.inner_radius),
                        render(&cylinder.outer_radius),
                    ],
                    "Inner and outer radii [cm]",
                );
                Ok(())
            },
        )
        .when(is_cylindrical::<T>),
        Field::<T>::new(
            "sample height",
            |c, r, _| {
                r.geometry_block_mut().cylindrical.sample_height = read_float(c)?;
                Ok(())
            },
            |r, _, w| {
                w.value(&r.geometry_block().cylindrical.sample_height, "Sample height (cm)");
                Ok(())
            },
        )
        .when(is_cylindrical::<T>),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gudrun::model::{DensityUnits, Normalisation};
    use crate::gudrun::schema::read_fields;
    use rstest::rstest;

    #[rstest]
    #[case("SAMPLE water          {", "water")]
    #[case("SAMPLE          {", "SAMPLE")]
    #[case("SAMPLE H2O in N9 can{", "H2O in N9 can")]
    #[case("  SAMPLE SAMPLEX {  ", "SAMPLEX")]
    fn names_are_recovered_from_headers(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(record_name(line, "SAMPLE"), expected);
    }

    #[test]
    fn named_header_round_trips() {
        let mut writer = LineWriter::new();
        write_named_header(&mut writer, "CONTAINER", "N9 can").unwrap();
        let text = writer.finish();
        let mut cursor = LineCursor::new(&text);
        assert_eq!(read_named_header(&mut cursor, "CONTAINER").unwrap(), "N9 can");
        assert!(cursor.is_exhausted());
    }

    #[rstest]
    #[case("")]
    #[case(" padded")]
    #[case("BACKGROUND run")]
    #[case("H2O SAMPLE BACKGROUND run")]
    #[case("can SAMPLE BACKGROUND")]
    fn unreadable_names_are_rejected(#[case] name: &str) {
        let mut writer = LineWriter::new();
        assert!(write_named_header(&mut writer, "SAMPLE", name).is_err());
    }

    #[test]
    fn data_files_follow_count_line() {
        let mut cursor = LineCursor::new(
            "2  1          Number of files and period number\n\
             a.raw          water data files\n\
             b.raw          water data files\n\
             next",
        );
        let (period, files) = read_data_files(&mut cursor, "water").unwrap();
        assert_eq!(period, 1);
        assert_eq!(files.files, vec!["a.raw", "b.raw"]);
        assert_eq!(files.owner, "water");
        assert_eq!(cursor.peek(), Some("next"));
    }

    #[test]
    fn composition_counts_lines_before_sentinel() {
        let source = "*  0  0          * 0 0 to specify end of composition input";
        assert!(read_composition(&mut LineCursor::new(source)).unwrap().is_empty());

        let source = "Ti  0  7.16          Sample atomic composition\n\
                      Zr  0.0  3.438          Sample atomic composition\n\
                      *  0  0          * 0 0 to specify end of composition input";
        let elements = read_composition(&mut LineCursor::new(source)).unwrap();
        assert_eq!(
            elements,
            vec![Element::new("Ti", 0, 7.16), Element::new("Zr", 0, 3.438)]
        );
    }

    #[test]
    fn composition_rejects_unknown_symbols() {
        let composition =
            Composition::new("Sample").with_elements(vec![Element::new("Qq", 0, 1.0)]);
        let result = write_composition(&mut LineWriter::new(), &composition, "Sample");
        assert!(matches!(result, Err(SerializeError::UnknownElement { .. })));
    }

    #[test]
    fn composition_rejects_negative_abundance() {
        let composition =
            Composition::new("Sample").with_elements(vec![Element::new("H", 0, -1.0)]);
        let result = write_composition(&mut LineWriter::new(), &composition, "Sample");
        assert!(matches!(result, Err(SerializeError::NegativeAbundance { .. })));
    }

    #[test]
    fn density_line_keeps_sign() {
        let mut writer = LineWriter::new();
        write_density(&mut writer, Density::new(0.0542, DensityUnits::Atomic));
        let text = writer.finish();
        assert_eq!(text, "-0.0542          Density atoms/\u{212b}^3?");
        let density = read_density(&mut LineCursor::new(&text)).unwrap();
        assert_eq!(density, Density::new(0.0542, DensityUnits::Atomic));
    }

    fn read_geometry_block(source: &str, ctx: &Context) -> (Normalisation, usize) {
        let mut cursor = LineCursor::new(source);
        let mut record = Normalisation::default();
        read_fields(&geometry_fields(), &mut cursor, &mut record, ctx).unwrap();
        (record, cursor.position())
    }

    #[test]
    fn flat_plate_consumes_two_lines() {
        let source = "FLATPLATE          Geometry\n\
                      0.1  0.2          Upstream and downstream thicknesses [cm]\n\
                      0.0  5.0          Angle of rotation and sample width (cm)\n\
                      next";
        let (record, consumed) = read_geometry_block(source, &Context::default());
        assert_eq!(consumed, 3);
        assert_eq!(record.geometry.flat_plate.downstream_thickness, 0.2);
        assert_eq!(record.geometry.flat_plate.sample_width, 5.0);
    }

    #[test]
    fn cylindrical_consumes_two_lines() {
        let source = "CYLINDRICAL          Geometry\n\
                      0.0  0.3          Inner and outer radii [cm]\n\
                      4.0          Sample height (cm)\n\
                      next";
        let (record, consumed) = read_geometry_block(source, &Context::default());
        assert_eq!(consumed, 3);
        assert_eq!(record.geometry.cylindrical.outer_radius, 0.3);
        assert_eq!(record.geometry.cylindrical.sample_height, 4.0);
    }

    #[test]
    fn same_as_beam_defers_to_beam_geometry() {
        let source = "SameAsBeam          Geometry\n\
                      0.0  0.3          Inner and outer radii [cm]\n\
                      4.0          Sample height (cm)\n\
                      next";
        let ctx = Context::default().with_beam_geometry(Geometry::Cylindrical);
        let (record, consumed) = read_geometry_block(source, &ctx);
        assert_eq!(consumed, 3);
        assert_eq!(record.geometry.geometry, Geometry::SameAsBeam);
        assert_eq!(record.geometry.cylindrical.sample_height, 4.0);
    }

    #[test]
    fn unknown_geometry_is_reported() {
        let mut cursor = LineCursor::new("SPHERICAL          Geometry");
        assert!(matches!(
            read_geometry(&mut cursor),
            Err(LineError::UnknownVariant { .. })
        ));
    }
}
