use super::shared::{consume_keyword_header, read_geometry};
use super::Schema;
use crate::gudrun::error::{LineError, RecordKind};
use crate::gudrun::model::{Beam, BeamEdges, Geometry};
use crate::gudrun::scalars;
use crate::gudrun::schema::{read_float, read_startup_file, read_unsigned, render, word, Field};
use once_cell::sync::Lazy;

type F = Field<Beam>;

fn read_edges(line: &str) -> Result<BeamEdges, LineError> {
    Ok(BeamEdges::new(
        scalars::nth_float(line, 0)?,
        scalars::nth_float(line, 1)?,
        scalars::nth_float(line, 2)?,
        scalars::nth_float(line, 3)?,
    ))
}

static SCHEMA: Lazy<Vec<F>> = Lazy::new(|| {
    vec![
        F::new(
            "header",
            |c, _, _| {
                consume_keyword_header(c, "BEAM");
                Ok(())
            },
            |_, _, w| {
                w.open("BEAM");
                Ok(())
            },
        ),
        // The beam defines what SameAsBeam means, so it cannot defer itself.
        F::new(
            "sample geometry",
            |c, b, _| {
                let line = c.peek().unwrap_or_default();
                let geometry = read_geometry(c)?;
                if geometry == Geometry::SameAsBeam {
                    return Err(LineError::UnknownVariant {
                        token: geometry.token().to_string(),
                        expected: "beam geometry",
                        line: line.to_string(),
                    });
                }
                b.sample_geometry = geometry;
                Ok(())
            },
            |b, _, w| {
                w.line([b.sample_geometry.token()], "Sample geometry");
                Ok(())
            },
        ),
        F::new(
            "number of beam profile values",
            |c, _, _| {
                c.pop()?;
                Ok(())
            },
            |b, _, w| {
                w.value(&b.beam_profile_values.len(), "Number of beam profile values");
                Ok(())
            },
        ),
        F::new(
            "beam profile values",
            |c, b, _| {
                b.beam_profile_values = scalars::leading(c.pop()?);
                Ok(())
            },
            |b, _, w| {
                w.line(
                    b.beam_profile_values.iter().map(render),
                    "Beam profile values (Maximum of 50 allowed currently)",
                );
                Ok(())
            },
        ),
        F::new(
            "absorption and multiple scattering steps",
            |c, b, _| {
                let line = c.pop()?;
                b.step_size_absorption = scalars::nth_float(line, 0)?;
                b.step_size_ms = scalars::nth_float(line, 1)?;
                b.no_slices_penetration = scalars::nth_unsigned(line, 2)?;
                Ok(())
            },
            |b, _, w| {
                w.line(
                    [
                        render(&b.step_size_absorption),
                        render(&b.step_size_ms),
                        render(&b.no_slices_penetration),
                    ],
                    "Step size for absorption and m.s. calculation and no. of slices",
                );
                Ok(())
            },
        ),
        F::new(
            "angular step",
            |c, b, _| {
                b.angular_step_for_corrections = read_unsigned(c)?;
                Ok(())
            },
            |b, _, w| {
                w.value(
                    &b.angular_step_for_corrections,
                    "Step in scattering angle to calculate corrections at [deg.]",
                );
                Ok(())
            },
        ),
        F::new(
            "incident beam edges",
            |c, b, _| {
                b.incident_beam_edges = read_edges(c.pop()?)?;
                Ok(())
            },
            |b, _, w| {
                w.line(
                    b.incident_beam_edges.to_array().iter().map(render),
                    "Incident beam edges relative to centre of sample [cm]",
                );
                Ok(())
            },
        ),
        F::new(
            "scattered beam edges",
            |c, b, _| {
                b.scattered_beam_edges = read_edges(c.pop()?)?;
                Ok(())
            },
            |b, _, w| {
                w.line(
                    b.scattered_beam_edges.to_array().iter().map(render),
                    "Scattered beam edges relative to centre of sample [cm]",
                );
                Ok(())
            },
        ),
        F::new(
            "incident beam spectrum parameters file",
            |c, b, _| {
                b.filename_incident_beam_spectrum_params = read_startup_file(c)?;
                Ok(())
            },
            |b, _, w| {
                w.line(
                    [word(
                        "incident beam spectrum parameters file",
                        &b.filename_incident_beam_spectrum_params,
                    )?],
                    "Filename containing incident beam spectrum parameters",
                );
                Ok(())
            },
        ),
        F::new(
            "overall background factor",
            |c, b, _| {
                b.overall_background_factor = read_float(c)?;
                Ok(())
            },
            |b, _, w| {
                w.value(&b.overall_background_factor, "Overall background factor");
                Ok(())
            },
        ),
        F::new(
            "sample dependent background factor",
            |c, b, _| {
                b.sample_dependent_background_factor = read_float(c)?;
                Ok(())
            },
            |b, _, w| {
                w.value(
                    &b.sample_dependent_background_factor,
                    "Sample dependent background factor",
                );
                Ok(())
            },
        ),
        F::new(
            "shielding attenuation coefficient",
            |c, b, _| {
                b.shielding_attenuation_coefficient = read_float(c)?;
                Ok(())
            },
            |b, _, w| {
                w.value(
                    &b.shielding_attenuation_coefficient,
                    "Shielding attenuation coefficient [per m per \u{212b}]",
                );
                Ok(())
            },
        ),
    ]
});

impl Schema for Beam {
    const KIND: RecordKind = RecordKind::Beam;

    fn fields() -> &'static [Field<Self>] {
        &SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gudrun::cursor::LineCursor;
    use crate::gudrun::records::{parse_record, write_record};
    use crate::gudrun::schema::Context;

    const BEAM: &str = "BEAM          {

CYLINDRICAL          Sample geometry
2          Number of beam profile values
1.0  1.0          Beam profile values (Maximum of 50 allowed currently)
0.05  0.2  100          Step size for absorption and m.s. calculation and no. of slices
10          Step in scattering angle to calculate corrections at [deg.]
-1.5  1.5  -1.5  1.5          Incident beam edges relative to centre of sample [cm]
-2.0  2.0  -2.1  2.1          Scattered beam edges relative to centre of sample [cm]
/opt/Gudrun/StartupFiles/NIMROD/spectrum000.dat          Filename containing incident beam spectrum parameters
1.0          Overall background factor
0.0          Sample dependent background factor
0.0          Shielding attenuation coefficient [per m per \u{212b}]

}";

    #[test]
    fn parses_beam_block() {
        let mut cursor = LineCursor::new(BEAM);
        let beam: Beam = parse_record(&mut cursor, &Context::default()).unwrap();
        assert_eq!(beam.sample_geometry, Geometry::Cylindrical);
        assert_eq!(beam.beam_profile_values, vec![1.0, 1.0]);
        assert_eq!(beam.no_slices_penetration, 100);
        assert_eq!(beam.scattered_beam_edges.bottom, -2.1);
        assert_eq!(
            beam.filename_incident_beam_spectrum_params,
            "StartupFiles/NIMROD/spectrum000.dat"
        );
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn beam_cannot_be_same_as_beam() {
        let source = BEAM.replace("CYLINDRICAL", "SameAsBeam");
        let err = parse_record::<Beam>(&mut LineCursor::new(&source), &Context::default())
            .unwrap_err();
        assert_eq!(err.kind, RecordKind::Beam);
        assert!(matches!(
            err.cause,
            LineError::UnknownVariant {
                expected: "beam geometry",
                ..
            }
        ));
    }

    #[test]
    fn profile_count_is_derived_on_write() {
        let beam = Beam {
            beam_profile_values: vec![0.5, 1.0, 0.5],
            ..Beam::default()
        };
        let text = write_record(&beam, &Context::default()).unwrap();
        assert!(text.contains("\n3          Number of beam profile values\n"));
        let parsed: Beam = parse_record(&mut LineCursor::new(&text), &Context::default()).unwrap();
        assert_eq!(parsed, beam);
    }
}
