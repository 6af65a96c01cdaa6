use super::shared::consume_keyword_header;
use super::Schema;
use crate::gudrun::error::{LineError, RecordKind};
use crate::gudrun::model::{Coded, GroupingParameter, Instrument, InstrumentName};
use crate::gudrun::parsing::ParseMode;
use crate::gudrun::scalars;
use crate::gudrun::schema::{
    read_bool, read_coded, read_float, read_list, read_startup_file, read_unsigned, read_word,
    render, word, Field, GROUPING_END, SPC2, SPC5,
};
use once_cell::sync::Lazy;

type F = Field<Instrument>;

static SCHEMA: Lazy<Vec<F>> = Lazy::new(|| {
    vec![
        F::new(
            "header",
            |c, _, _| {
                consume_keyword_header(c, "INSTRUMENT");
                Ok(())
            },
            |_, _, w| {
                w.open("INSTRUMENT");
                Ok(())
            },
        ),
        F::new(
            "instrument name",
            |c, i, _| {
                let line = c.pop()?;
                let token = scalars::first_word(line)?;
                i.name = InstrumentName::from_token(token).ok_or_else(|| {
                    LineError::UnknownVariant {
                        token: token.to_string(),
                        expected: "instrument name",
                        line: line.to_string(),
                    }
                })?;
                Ok(())
            },
            |i, _, w| {
                w.line([i.name.token()], "Instrument name");
                Ok(())
            },
        ),
        // Recomputed from the source path; the stored value is not trusted.
        F::new(
            "gudrun input file directory",
            |c, _, _| {
                c.pop()?;
                Ok(())
            },
            |i, _, w| {
                w.line([i.gudrun_input_file_dir.as_str()], "Gudrun input file directory:");
                Ok(())
            },
        ),
        F::new(
            "data file directory",
            |c, i, _| {
                i.data_file_dir = read_word(c)?;
                Ok(())
            },
            |i, _, w| {
                w.line([word("data file directory", &i.data_file_dir)?], "Data file directory");
                Ok(())
            },
        ),
        F::new(
            "data file type",
            |c, i, _| {
                i.data_file_type = read_word(c)?;
                Ok(())
            },
            |i, _, w| {
                w.line([word("data file type", &i.data_file_type)?], "Data file type");
                Ok(())
            },
        ),
        F::new(
            "detector calibration file",
            |c, i, _| {
                i.detector_calibration_file_name = read_startup_file(c)?;
                Ok(())
            },
            |i, _, w| {
                w.line(
                    [word("detector calibration file", &i.detector_calibration_file_name)?],
                    "Detector calibration file name",
                );
                Ok(())
            },
        ),
        F::new(
            "phi values column",
            |c, i, _| {
                i.column_no_phi_vals = read_unsigned(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(&i.column_no_phi_vals, "User table column number for phi values");
                Ok(())
            },
        ),
        F::new(
            "groups file",
            |c, i, _| {
                i.group_file_name = read_startup_file(c)?;
                Ok(())
            },
            |i, _, w| {
                w.line([word("groups file", &i.group_file_name)?], "Groups file name");
                Ok(())
            },
        ),
        F::new(
            "deadtime constants file",
            |c, i, _| {
                i.deadtime_constants_file_name = read_startup_file(c)?;
                Ok(())
            },
            |i, _, w| {
                w.line(
                    [word("deadtime constants file", &i.deadtime_constants_file_name)?],
                    "Deadtime constants file name",
                );
                Ok(())
            },
        ),
        F::new(
            "incident monitor spectra",
            |c, i, _| {
                i.spectrum_numbers_for_incident_beam_monitor = scalars::leading(c.pop()?);
                Ok(())
            },
            |i, _, w| {
                w.line(
                    i.spectrum_numbers_for_incident_beam_monitor.iter().map(render),
                    "Spectrum number(s) for incident beam monitor",
                );
                Ok(())
            },
        ),
        F::new(
            "monitor normalisation wavelength range",
            |c, i, _| {
                let line = c.pop()?;
                i.wavelength_range_for_monitor_normalisation =
                    (scalars::nth_float(line, 0)?, scalars::nth_float(line, 1)?);
                Ok(())
            },
            |i, _, w| {
                let (low, high) = i.wavelength_range_for_monitor_normalisation;
                w.line(
                    [render(&low), render(&high)],
                    "Wavelength range [\u{212b}] for monitor normalisation",
                );
                Ok(())
            },
        ),
        F::new(
            "transmission monitor spectra",
            |c, i, _| {
                i.spectrum_numbers_for_transmission_monitor = scalars::leading(c.pop()?);
                Ok(())
            },
            |i, _, w| {
                w.line(
                    i.spectrum_numbers_for_transmission_monitor.iter().map(render),
                    "Spectrum number(s) for transmission monitor",
                );
                Ok(())
            },
        ),
        F::new(
            "incident monitor quiet count constant",
            |c, i, _| {
                i.incident_monitor_quiet_count_const = read_float(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(
                    &i.incident_monitor_quiet_count_const,
                    "Incident monitor quiet count constant",
                );
                Ok(())
            },
        ),
        F::new(
            "transmission monitor quiet count constant",
            |c, i, _| {
                i.transmission_monitor_quiet_count_const = read_float(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(
                    &i.transmission_monitor_quiet_count_const,
                    "Transmission monitor quiet count constant",
                );
                Ok(())
            },
        ),
        F::new(
            "spike analysis channels",
            |c, i, _| {
                let line = c.pop()?;
                i.channel_nos_spike_analysis = (
                    scalars::nth_unsigned(line, 0)?,
                    scalars::nth_unsigned(line, 1)?,
                );
                Ok(())
            },
            |i, _, w| {
                let (first, last) = i.channel_nos_spike_analysis;
                w.line(
                    [render(&first), render(&last)],
                    "Channel numbers for spike analysis",
                );
                Ok(())
            },
        ),
        F::new(
            "spike analysis acceptance factor",
            |c, i, _| {
                i.spike_analysis_acceptance_factor = read_float(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(
                    &i.spike_analysis_acceptance_factor,
                    "Spike analysis acceptance factor",
                );
                Ok(())
            },
        ),
        F::new(
            "wavelength range",
            |c, i, _| {
                let line = c.pop()?;
                i.wavelength_min = scalars::nth_float(line, 0)?;
                i.wavelength_max = scalars::nth_float(line, 1)?;
                i.wavelength_step = scalars::nth_float(line, 2)?;
                Ok(())
            },
            |i, _, w| {
                w.line(
                    [
                        render(&i.wavelength_min),
                        render(&i.wavelength_max),
                        render(&i.wavelength_step),
                    ],
                    "Wavelength range to use [\u{212b}] and step size",
                );
                Ok(())
            },
        ),
        F::new(
            "smooths on monitor",
            |c, i, _| {
                i.no_smooths_on_monitor = read_unsigned(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(&i.no_smooths_on_monitor, "No. of smooths on monitor");
                Ok(())
            },
        ),
        F::new(
            "x range",
            |c, i, _| {
                let line = c.pop()?;
                i.x_min = scalars::nth_float(line, 0)?;
                i.x_max = scalars::nth_float(line, 1)?;
                i.x_step = scalars::nth_float(line, 2)?;
                Ok(())
            },
            |i, _, w| {
                w.line(
                    [render(&i.x_min), render(&i.x_max), render(&i.x_step)],
                    "Min, Max and step in x-scale (-ve for logarithmic binning)",
                );
                Ok(())
            },
        ),
        F::new(
            "grouping parameter panel",
            |c, i, _| {
                i.grouping_parameter_panel = read_list(c, GROUPING_END, |line| {
                    Ok(GroupingParameter {
                        group: scalars::nth_unsigned(line, 0)?,
                        x_min: scalars::nth_float(line, 1)?,
                        x_max: scalars::nth_float(line, 2)?,
                        background_factor: scalars::nth_float(line, 3)?,
                    })
                })?;
                Ok(())
            },
            |i, _, w| {
                for row in &i.grouping_parameter_panel {
                    w.line(
                        [
                            render(&row.group),
                            render(&row.x_min),
                            render(&row.x_max),
                            render(&row.background_factor),
                        ],
                        "Group, Xmin, Xmax, Background factor",
                    );
                }
                w.raw(format!(
                    "0{SPC2}0{SPC2}0{SPC2}0{SPC5}0 0 0 0 to end input of specified values"
                ));
                Ok(())
            },
        ),
        F::new(
            "groups acceptance factor",
            |c, i, _| {
                i.groups_acceptance_factor = read_float(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(&i.groups_acceptance_factor, "Groups acceptance factor");
                Ok(())
            },
        ),
        F::new(
            "merge power",
            |c, i, _| {
                i.merge_power = scalars::nth_as(c.pop()?, 0, "integer")?;
                Ok(())
            },
            |i, _, w| {
                w.value(&i.merge_power, "Merge power");
                Ok(())
            },
        ),
        F::new(
            "subtract single atom scattering",
            |c, i, _| {
                i.subtract_single_atom_scattering = read_bool(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(
                    &i.subtract_single_atom_scattering,
                    "Subtract single atom scattering?",
                );
                Ok(())
            },
        ),
        F::new(
            "merge weights",
            |c, i, _| {
                i.merge_weights = read_coded(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(
                    &i.merge_weights.code(),
                    "By channel? (0 = none, 1 = detector, 2 = channel)",
                );
                Ok(())
            },
        ),
        F::new(
            "incident flight path",
            |c, i, _| {
                i.incident_flight_path = read_float(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(&i.incident_flight_path, "Incident flight path [m]");
                Ok(())
            },
        ),
        F::new(
            "diagnostic spectrum",
            |c, i, _| {
                i.spectrum_number_for_output_diagnostic_files = read_unsigned(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(
                    &i.spectrum_number_for_output_diagnostic_files,
                    "Spectrum number to output diagnostic files",
                );
                Ok(())
            },
        ),
        F::new(
            "neutron scattering parameters file",
            |c, i, _| {
                i.neutron_scattering_parameters_file = read_startup_file(c)?;
                Ok(())
            },
            |i, _, w| {
                w.line(
                    [word(
                        "neutron scattering parameters file",
                        &i.neutron_scattering_parameters_file,
                    )?],
                    "Neutron scattering parameters file",
                );
                Ok(())
            },
        ),
        F::new(
            "scale selection",
            |c, i, _| {
                i.scale_selection = read_coded(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(
                    &i.scale_selection.code(),
                    "Scale selection: 1 = Q, 2 = d-space, 3 = wavelength, 4 = energy, 5 = TOF",
                );
                Ok(())
            },
        ),
        F::new(
            "subtract wavelength-binned data",
            |c, i, _| {
                i.subtract_wavelength_binned_data = read_bool(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(
                    &i.subtract_wavelength_binned_data,
                    "Subtract wavelength-binned data?",
                );
                Ok(())
            },
        ),
        F::new(
            "gudrun start folder",
            |c, i, _| {
                i.gudrun_start_folder = read_word(c)?;
                Ok(())
            },
            |i, _, w| {
                w.line(
                    [word("gudrun start folder", &i.gudrun_start_folder)?],
                    "Folder where Gudrun started",
                );
                Ok(())
            },
        ),
        F::new(
            "startup file folder",
            |c, i, _| {
                i.startup_file_folder = read_word(c)?;
                Ok(())
            },
            |i, _, w| {
                w.line(
                    [word("startup file folder", &i.startup_file_folder)?],
                    "Folder containing the startup file",
                );
                Ok(())
            },
        ),
        F::new(
            "logarithmic step size",
            |c, i, _| {
                i.log_wavelength_binning_step_size = read_float(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(&i.log_wavelength_binning_step_size, "Logarithmic step size");
                Ok(())
            },
        ),
        F::new(
            "hard group edges",
            |c, i, _| {
                i.hard_group_edges = read_bool(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(&i.hard_group_edges, "Hard group edges?");
                Ok(())
            },
        ),
        F::new(
            "nexus definition file",
            |c, i, _| {
                i.nxs_definition_file = read_word(c)?;
                Ok(())
            },
            |i, _, w| {
                w.line(
                    [word("nexus definition file", &i.nxs_definition_file)?],
                    "NeXus definition file",
                );
                Ok(())
            },
        )
        .when(|i, _| i.uses_nexus()),
        F::new(
            "good detector threshold",
            |c, i, _| {
                i.good_detector_threshold = read_unsigned(c)?;
                Ok(())
            },
            |i, _, w| {
                w.value(&i.good_detector_threshold, "Good detector threshold");
                Ok(())
            },
        )
        .when(|_, ctx| ctx.mode == ParseMode::Template),
    ]
});

impl Schema for Instrument {
    const KIND: RecordKind = RecordKind::Instrument;

    fn fields() -> &'static [Field<Self>] {
        &SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gudrun::cursor::LineCursor;
    use crate::gudrun::model::{MergeWeights, Scales};
    use crate::gudrun::records::{parse_record, write_record};
    use crate::gudrun::schema::Context;
    use crate::gudrun::testing;

    #[test]
    fn parses_instrument_block() {
        let source = testing::instrument_block();
        let mut cursor = LineCursor::new(&source);
        let instrument: Instrument = parse_record(&mut cursor, &Context::default()).unwrap();

        assert_eq!(instrument.name, InstrumentName::Nimrod);
        assert_eq!(instrument.data_file_dir, "/data/nimrod/");
        assert_eq!(
            instrument.detector_calibration_file_name,
            "StartupFiles/NIMROD/NIMROD84modules+9.dat"
        );
        assert_eq!(
            instrument.spectrum_numbers_for_incident_beam_monitor,
            vec![4, 5, 6, 7, 8]
        );
        assert_eq!(instrument.channel_nos_spike_analysis, (0, 0));
        assert_eq!(instrument.grouping_parameter_panel.len(), 2);
        assert_eq!(instrument.grouping_parameter_panel[1].x_max, 40.0);
        assert_eq!(instrument.merge_weights, MergeWeights::Channel);
        assert_eq!(instrument.scale_selection, Scales::Q);
        assert!(!instrument.hard_group_edges);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn nexus_definition_only_for_nexus_data() {
        let mut instrument = Instrument::default();
        let ctx = Context::default();
        let text = write_record(&instrument, &ctx).unwrap();
        assert!(!text.contains("NeXus definition file"));

        instrument.data_file_type = "NXS".into();
        instrument.nxs_definition_file = "nimrod.nxs.def".into();
        let text = write_record(&instrument, &ctx).unwrap();
        assert!(text.contains("nimrod.nxs.def          NeXus definition file"));

        let parsed: Instrument = parse_record(&mut LineCursor::new(&text), &ctx).unwrap();
        assert_eq!(parsed.nxs_definition_file, "nimrod.nxs.def");
    }

    #[test]
    fn template_mode_reads_good_detector_threshold() {
        let mut instrument = Instrument::default();
        instrument.good_detector_threshold = 7;
        let ctx = Context::new(ParseMode::Template);
        let text = write_record(&instrument, &ctx).unwrap();
        let parsed: Instrument = parse_record(&mut LineCursor::new(&text), &ctx).unwrap();
        assert_eq!(parsed.good_detector_threshold, 7);
    }

    #[test]
    fn unknown_instrument_is_a_record_error() {
        let mut cursor = LineCursor::new("INSTRUMENT          {\n\nISIS          Instrument name\n");
        let err = parse_record::<Instrument>(&mut cursor, &Context::default()).unwrap_err();
        assert_eq!(err.kind, RecordKind::Instrument);
        assert!(matches!(err.cause, LineError::UnknownVariant { .. }));
    }

    #[test]
    fn round_trip_preserves_fields() {
        let ctx = Context::default();
        let mut instrument = Instrument::default();
        instrument.spectrum_numbers_for_incident_beam_monitor = vec![4, 5];
        instrument.grouping_parameter_panel = vec![GroupingParameter {
            group: 1,
            x_min: 0.5,
            x_max: 30.0,
            background_factor: 1.0,
        }];
        let text = write_record(&instrument, &ctx).unwrap();
        let parsed: Instrument = parse_record(&mut LineCursor::new(&text), &ctx).unwrap();
        assert_eq!(parsed, instrument);
    }
}
