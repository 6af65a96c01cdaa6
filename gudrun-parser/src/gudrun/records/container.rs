use super::shared::{
    geometry_fields, read_composition, read_cross_section_source, read_data_files, read_density,
    read_named_header, write_composition, write_cross_section_source, write_data_files,
    write_density, write_named_header,
};
use super::{parse_record, Schema};
use crate::gudrun::cursor::{is_blank, is_closing_brace, LineCursor};
use crate::gudrun::error::{RecordKind, RecordParseError};
use crate::gudrun::model::Container;
use crate::gudrun::parsing::ParseMode;
use crate::gudrun::scalars;
use crate::gudrun::schema::{read_float, render, Context, Field};
use once_cell::sync::Lazy;

type F = Field<Container>;

/// Older files end the container after the tweak factor.
fn has_environment_line(cursor: &LineCursor<'_>) -> bool {
    cursor
        .peek()
        .is_some_and(|line| !is_blank(line) && !is_closing_brace(line))
}

static SCHEMA: Lazy<Vec<F>> = Lazy::new(|| {
    let mut fields = vec![
        F::new(
            "header",
            |c, k, _| {
                k.name = read_named_header(c, "CONTAINER")?;
                Ok(())
            },
            |k, _, w| write_named_header(w, "CONTAINER", &k.name),
        ),
        F::new(
            "data files",
            |c, k, _| {
                (k.period_number, k.data_files) = read_data_files(c, &k.name)?;
                Ok(())
            },
            |k, _, w| write_data_files(w, k.period_number, &k.data_files, &k.name),
        ),
        F::new(
            "composition",
            |c, k, _| {
                k.composition.elements = read_composition(c)?;
                Ok(())
            },
            |k, _, w| write_composition(w, &k.composition, "Container"),
        ),
    ];
    fields.extend(geometry_fields::<Container>());
    fields.extend([
        F::new(
            "density",
            |c, k, _| {
                k.density = read_density(c)?;
                Ok(())
            },
            |k, _, w| {
                write_density(w, k.density);
                Ok(())
            },
        ),
        F::new(
            "total cross section source",
            |c, k, _| {
                k.total_cross_section_source = read_cross_section_source(c)?;
                Ok(())
            },
            |k, _, w| write_cross_section_source(w, &k.total_cross_section_source),
        ),
        F::new(
            "tweak factor",
            |c, k, _| {
                k.tweak_factor = read_float(c)?;
                Ok(())
            },
            |k, _, w| {
                w.value(&k.tweak_factor, "Tweak factor");
                Ok(())
            },
        ),
        F::new(
            "environment scattering",
            |c, k, _| {
                if has_environment_line(c) {
                    let line = c.pop()?;
                    k.scattering_fraction = scalars::nth_float(line, 0)?;
                    k.attenuation_coefficient = scalars::nth_float(line, 1)?;
                }
                Ok(())
            },
            |k, _, w| {
                w.line(
                    [
                        render(&k.scattering_fraction),
                        render(&k.attenuation_coefficient),
                    ],
                    "Sample environment scattering fraction and attenuation coefficient [per \u{212b}]",
                );
                Ok(())
            },
        ),
    ]);
    fields
});

impl Schema for Container {
    const KIND: RecordKind = RecordKind::Container;

    fn fields() -> &'static [Field<Self>] {
        &SCHEMA
    }
}

impl Container {
    /// Read a stand-alone container definition, as shipped in container templates.
    pub fn from_template(text: &str) -> Result<Container, RecordParseError> {
        parse_record(&mut LineCursor::new(text), &Context::new(ParseMode::Template))
    }
}
