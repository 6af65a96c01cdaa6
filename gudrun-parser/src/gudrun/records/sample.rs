use super::shared::{
    geometry_fields, read_composition, read_cross_section_source, read_data_files, read_density,
    read_named_header, write_composition, write_cross_section_source, write_data_files,
    write_density, write_named_header,
};
use super::Schema;
use crate::gudrun::error::RecordKind;
use crate::gudrun::model::{Coded, ExponentialTerm, ResonanceRange, Sample};
use crate::gudrun::scalars;
use crate::gudrun::schema::{
    read_bool, read_coded, read_float, read_list, read_word, render, word, Field,
    EXPONENTIAL_END, RESONANCE_END, SPC2, SPC5,
};
use once_cell::sync::Lazy;

type F = Field<Sample>;

static SCHEMA: Lazy<Vec<F>> = Lazy::new(|| {
    let mut fields = vec![
        F::new(
            "header",
            |c, s, _| {
                s.name = read_named_header(c, "SAMPLE")?;
                Ok(())
            },
            |s, _, w| write_named_header(w, "SAMPLE", &s.name),
        ),
        F::new(
            "data files",
            |c, s, _| {
                (s.period_number, s.data_files) = read_data_files(c, &s.name)?;
                Ok(())
            },
            |s, _, w| write_data_files(w, s.period_number, &s.data_files, &s.name),
        ),
        F::new(
            "force calculation of corrections",
            |c, s, _| {
                s.force_calculation_of_corrections = read_bool(c)?;
                Ok(())
            },
            |s, _, w| {
                w.value(
                    &s.force_calculation_of_corrections,
                    "Force calculation of sample corrections?",
                );
                Ok(())
            },
        ),
        F::new(
            "composition",
            |c, s, _| {
                s.composition.elements = read_composition(c)?;
                Ok(())
            },
            |s, _, w| write_composition(w, &s.composition, "Sample"),
        ),
    ];
    fields.extend(geometry_fields::<Sample>());
    fields.extend([
        F::new(
            "density",
            |c, s, _| {
                s.density = read_density(c)?;
                Ok(())
            },
            |s, _, w| {
                write_density(w, s.density);
                Ok(())
            },
        ),
        F::new(
            "placzek temperature",
            |c, s, _| {
                s.temp_for_normalisation_pc = read_float(c)?;
                Ok(())
            },
            |s, _, w| {
                w.value(
                    &s.temp_for_normalisation_pc,
                    "Temperature for sample Placzek correction",
                );
                Ok(())
            },
        ),
        F::new(
            "total cross section source",
            |c, s, _| {
                s.total_cross_section_source = read_cross_section_source(c)?;
                Ok(())
            },
            |s, _, w| write_cross_section_source(w, &s.total_cross_section_source),
        ),
        F::new(
            "tweak factor",
            |c, s, _| {
                s.sample_tweak_factor = read_float(c)?;
                Ok(())
            },
            |s, _, w| {
                w.value(&s.sample_tweak_factor, "Sample tweak factor");
                Ok(())
            },
        ),
        // The sign of the width carries the Fourier transform mode.
        F::new(
            "top hat width",
            |c, s, _| {
                let raw = read_float(c)?;
                s.set_encoded_top_hat_width(raw);
                Ok(())
            },
            |s, _, w| {
                w.value(
                    &s.encoded_top_hat_width(),
                    "Top hat width (1/\u{212b}) for cleaning up Fourier Transform",
                );
                Ok(())
            },
        ),
        F::new(
            "minimum radius for FT",
            |c, s, _| {
                s.min_rad_ft = read_float(c)?;
                Ok(())
            },
            |s, _, w| {
                w.value(&s.min_rad_ft, "Minimum radius for FT  [\u{212b}]");
                Ok(())
            },
        ),
        F::new(
            "g(r) broadening",
            |c, s, _| {
                s.gr_broadening = read_float(c)?;
                Ok(())
            },
            |s, _, w| {
                w.value(
                    &s.gr_broadening,
                    "g(r) broadening at r = 1\u{212b} [\u{212b}]",
                );
                Ok(())
            },
        ),
        F::new(
            "resonance wavelength ranges",
            |c, s, _| {
                s.resonance_values = read_list(c, RESONANCE_END, |line| {
                    Ok(ResonanceRange {
                        min_wavelength: scalars::nth_float(line, 0)?,
                        max_wavelength: scalars::nth_float(line, 1)?,
                    })
                })?;
                Ok(())
            },
            |s, _, w| {
                for range in &s.resonance_values {
                    w.line(
                        [render(&range.min_wavelength), render(&range.max_wavelength)],
                        "Min and max wavelength [\u{212b}] of resonance",
                    );
                }
                w.raw(format!("0{SPC2}0{SPC5}{RESONANCE_END}"));
                Ok(())
            },
        ),
        F::new(
            "exponential terms",
            |c, s, _| {
                s.exponential_values = read_list(c, EXPONENTIAL_END, |line| {
                    Ok(ExponentialTerm {
                        amplitude: scalars::nth_float(line, 0)?,
                        decay: scalars::nth_float(line, 1)?,
                        n: scalars::nth_int(line, 2)?,
                    })
                })?;
                Ok(())
            },
            |s, _, w| {
                for term in &s.exponential_values {
                    w.line(
                        [render(&term.amplitude), render(&term.decay), render(&term.n)],
                        "Exponential amplitude and decay [1/\u{212b}]",
                    );
                }
                w.raw(format!("*{SPC2}0{SPC2}0{SPC5}* 0 0 {EXPONENTIAL_END}"));
                Ok(())
            },
        ),
        F::new(
            "normalisation correction factor",
            |c, s, _| {
                s.normalisation_correction_factor = read_float(c)?;
                Ok(())
            },
            |s, _, w| {
                w.value(
                    &s.normalisation_correction_factor,
                    "Normalisation correction factor",
                );
                Ok(())
            },
        ),
        F::new(
            "self scattering file",
            |c, s, _| {
                s.file_self_scattering = read_word(c)?;
                Ok(())
            },
            |s, _, w| {
                w.line(
                    [word("self scattering file", &s.file_self_scattering)?],
                    "Name of file containing self scattering as a function of wavelength [\u{212b}]",
                );
                Ok(())
            },
        ),
        F::new(
            "normalise to",
            |c, s, _| {
                s.normalise_to = read_coded(c)?;
                Ok(())
            },
            |s, _, w| {
                w.value(
                    &s.normalise_to.code(),
                    "Normalise to: 0 = nothing, 1 = <b>^2, 2 = <b^2>",
                );
                Ok(())
            },
        ),
        F::new(
            "maximum radius for FT",
            |c, s, _| {
                s.max_rad_ft = read_float(c)?;
                Ok(())
            },
            |s, _, w| {
                w.value(&s.max_rad_ft, "Maximum radius for FT [\u{212b}]");
                Ok(())
            },
        ),
        F::new(
            "output units",
            |c, s, _| {
                s.output_units = read_coded(c)?;
                Ok(())
            },
            |s, _, w| {
                w.value(
                    &s.output_units.code(),
                    "Output units: 0 = b/atom/sr, 1 = cm^-1/sr",
                );
                Ok(())
            },
        ),
        F::new(
            "power for broadening",
            |c, s, _| {
                s.power_for_broadening = read_float(c)?;
                Ok(())
            },
            |s, _, w| {
                w.value(
                    &s.power_for_broadening,
                    "Power for broadening function e.g. 0.5",
                );
                Ok(())
            },
        ),
        F::new(
            "step size",
            |c, s, _| {
                s.step_size = read_float(c)?;
                Ok(())
            },
            |s, _, w| {
                w.value(&s.step_size, "Step size [\u{212b}]");
                Ok(())
            },
        ),
        F::new(
            "run this sample",
            |c, s, _| {
                s.run_this_sample = read_bool(c)?;
                Ok(())
            },
            |s, _, w| {
                w.value(&s.run_this_sample, "Analyse this sample?");
                Ok(())
            },
        ),
        F::new(
            "environment scattering",
            |c, s, _| {
                let line = c.pop()?;
                s.scattering_fraction = scalars::nth_float(line, 0)?;
                s.attenuation_coefficient = scalars::nth_float(line, 1)?;
                Ok(())
            },
            |s, _, w| {
                w.line(
                    [
                        render(&s.scattering_fraction),
                        render(&s.attenuation_coefficient),
                    ],
                    "Sample environment scattering fraction and attenuation coefficient [per \u{212b}]",
                );
                Ok(())
            },
        ),
    ]);
    fields
});

impl Schema for Sample {
    const KIND: RecordKind = RecordKind::Sample;

    fn fields() -> &'static [Field<Self>] {
        &SCHEMA
    }
}
