use super::shared::{
    consume_keyword_header, geometry_fields, read_composition, read_cross_section_source,
    read_data_files, read_density, write_composition, write_cross_section_source,
    write_data_files, write_density,
};
use super::Schema;
use crate::gudrun::error::RecordKind;
use crate::gudrun::model::Normalisation;
use crate::gudrun::schema::{read_bool, read_float, read_startup_file, word, Field};
use once_cell::sync::Lazy;

type F = Field<Normalisation>;

static SCHEMA: Lazy<Vec<F>> = Lazy::new(|| {
    let mut fields = vec![
        F::new(
            "header",
            |c, _, _| {
                consume_keyword_header(c, "NORMALISATION");
                Ok(())
            },
            |_, _, w| {
                w.open("NORMALISATION");
                Ok(())
            },
        ),
        F::new(
            "data files",
            |c, n, _| {
                (n.period_number, n.data_files) = read_data_files(c, "NORMALISATION")?;
                Ok(())
            },
            |n, _, w| write_data_files(w, n.period_number, &n.data_files, "NORMALISATION"),
        ),
        F::new(
            "background data files",
            |c, n, _| {
                (n.period_number_bg, n.data_files_bg) =
                    read_data_files(c, "NORMALISATION BACKGROUND")?;
                Ok(())
            },
            |n, _, w| {
                write_data_files(
                    w,
                    n.period_number_bg,
                    &n.data_files_bg,
                    "NORMALISATION BACKGROUND",
                )
            },
        ),
        F::new(
            "force calculation of corrections",
            |c, n, _| {
                n.force_calculation_of_corrections = read_bool(c)?;
                Ok(())
            },
            |n, _, w| {
                w.value(
                    &n.force_calculation_of_corrections,
                    "Force calculation of corrections?",
                );
                Ok(())
            },
        ),
        F::new(
            "composition",
            |c, n, _| {
                n.composition.elements = read_composition(c)?;
                Ok(())
            },
            |n, _, w| write_composition(w, &n.composition, "Normalisation"),
        ),
    ];
    fields.extend(geometry_fields::<Normalisation>());
    fields.extend([
        F::new(
            "density",
            |c, n, _| {
                n.density = read_density(c)?;
                Ok(())
            },
            |n, _, w| {
                write_density(w, n.density);
                Ok(())
            },
        ),
        F::new(
            "placzek temperature",
            |c, n, _| {
                n.temp_for_normalisation_pc = read_float(c)?;
                Ok(())
            },
            |n, _, w| {
                w.value(
                    &n.temp_for_normalisation_pc,
                    "Temperature for normalisation Placzek correction",
                );
                Ok(())
            },
        ),
        F::new(
            "total cross section source",
            |c, n, _| {
                n.total_cross_section_source = read_cross_section_source(c)?;
                Ok(())
            },
            |n, _, w| write_cross_section_source(w, &n.total_cross_section_source),
        ),
        F::new(
            "differential cross section file",
            |c, n, _| {
                n.normalisation_differential_cross_section_file = read_startup_file(c)?;
                Ok(())
            },
            |n, _, w| {
                w.line(
                    [word(
                        "normalisation differential cross section file",
                        &n.normalisation_differential_cross_section_file,
                    )?],
                    "Normalisation differential cross section filename",
                );
                Ok(())
            },
        ),
        F::new(
            "smoothed normalisation lower limit",
            |c, n, _| {
                n.lower_limit_smoothed_normalisation = read_float(c)?;
                Ok(())
            },
            |n, _, w| {
                w.value(
                    &n.lower_limit_smoothed_normalisation,
                    "Lower limit on smoothed normalisation",
                );
                Ok(())
            },
        ),
        F::new(
            "degree of smoothing",
            |c, n, _| {
                n.normalisation_degree_smoothing = read_float(c)?;
                Ok(())
            },
            |n, _, w| {
                w.value(
                    &n.normalisation_degree_smoothing,
                    "Normalisation degree of smoothing",
                );
                Ok(())
            },
        ),
        F::new(
            "minimum signal to background ratio",
            |c, n, _| {
                n.min_normalisation_signal_background_ratio = read_float(c)?;
                Ok(())
            },
            |n, _, w| {
                w.value(
                    &n.min_normalisation_signal_background_ratio,
                    "Minimum normalisation signal to background ratio",
                );
                Ok(())
            },
        ),
    ]);
    fields
});

impl Schema for Normalisation {
    const KIND: RecordKind = RecordKind::Normalisation;

    fn fields() -> &'static [Field<Self>] {
        &SCHEMA
    }
}
