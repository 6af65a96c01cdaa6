use super::enums::{InstrumentName, MergeWeights, Scales};
use serde::{Deserialize, Serialize};

/// One row of the grouping-parameter panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingParameter {
    pub group: u32,
    pub x_min: f64,
    pub x_max: f64,
    pub background_factor: f64,
}

/// Instrument-wide settings: file locations, monitors, binning and merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Instrument {
    pub name: InstrumentName,
    /// Directory holding the input file; derived from the source path, never parsed.
    pub gudrun_input_file_dir: String,
    pub data_file_dir: String,
    pub data_file_type: String,
    pub detector_calibration_file_name: String,
    pub column_no_phi_vals: u32,
    pub group_file_name: String,
    pub deadtime_constants_file_name: String,
    pub spectrum_numbers_for_incident_beam_monitor: Vec<u32>,
    pub wavelength_range_for_monitor_normalisation: (f64, f64),
    pub spectrum_numbers_for_transmission_monitor: Vec<u32>,
    pub incident_monitor_quiet_count_const: f64,
    pub transmission_monitor_quiet_count_const: f64,
    pub channel_nos_spike_analysis: (u32, u32),
    pub spike_analysis_acceptance_factor: f64,
    pub wavelength_min: f64,
    pub wavelength_max: f64,
    pub wavelength_step: f64,
    pub no_smooths_on_monitor: u32,
    pub x_min: f64,
    pub x_max: f64,
    pub x_step: f64,
    pub grouping_parameter_panel: Vec<GroupingParameter>,
    pub groups_acceptance_factor: f64,
    pub merge_power: i32,
    pub subtract_single_atom_scattering: bool,
    pub merge_weights: MergeWeights,
    pub incident_flight_path: f64,
    pub spectrum_number_for_output_diagnostic_files: u32,
    pub neutron_scattering_parameters_file: String,
    pub scale_selection: Scales,
    pub subtract_wavelength_binned_data: bool,
    pub gudrun_start_folder: String,
    pub startup_file_folder: String,
    pub log_wavelength_binning_step_size: f64,
    pub hard_group_edges: bool,
    /// Only present on disk when `data_file_type` is NeXus.
    pub nxs_definition_file: String,
    /// Only present in instrument templates.
    pub good_detector_threshold: u32,
}

impl Instrument {
    pub fn uses_nexus(&self) -> bool {
        matches!(self.data_file_type.as_str(), "NXS" | "nxs")
    }
}

impl Default for Instrument {
    fn default() -> Self {
        Self {
            name: InstrumentName::Nimrod,
            gudrun_input_file_dir: String::new(),
            data_file_dir: ".".to_string(),
            data_file_type: "raw".to_string(),
            detector_calibration_file_name: "*".to_string(),
            column_no_phi_vals: 4,
            group_file_name: "*".to_string(),
            deadtime_constants_file_name: "*".to_string(),
            spectrum_numbers_for_incident_beam_monitor: Vec::new(),
            wavelength_range_for_monitor_normalisation: (0.0, 0.0),
            spectrum_numbers_for_transmission_monitor: Vec::new(),
            incident_monitor_quiet_count_const: 0.0001,
            transmission_monitor_quiet_count_const: 0.0001,
            channel_nos_spike_analysis: (0, 0),
            spike_analysis_acceptance_factor: 5.0,
            wavelength_min: 0.05,
            wavelength_max: 12.0,
            wavelength_step: 0.1,
            no_smooths_on_monitor: 200,
            x_min: 0.01,
            x_max: 50.0,
            x_step: -0.025,
            grouping_parameter_panel: Vec::new(),
            groups_acceptance_factor: 1.0,
            merge_power: 4,
            subtract_single_atom_scattering: false,
            merge_weights: MergeWeights::Channel,
            incident_flight_path: 20.0,
            spectrum_number_for_output_diagnostic_files: 0,
            neutron_scattering_parameters_file: "*".to_string(),
            scale_selection: Scales::Q,
            subtract_wavelength_binned_data: false,
            gudrun_start_folder: ".".to_string(),
            startup_file_folder: ".".to_string(),
            log_wavelength_binning_step_size: 0.04,
            hard_group_edges: false,
            nxs_definition_file: "*".to_string(),
            good_detector_threshold: 0,
        }
    }
}
