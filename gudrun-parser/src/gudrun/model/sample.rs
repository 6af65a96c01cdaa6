use super::composition::Composition;
use super::container::Container;
use super::cross_section::CrossSectionSource;
use super::data_files::DataFiles;
use super::density::Density;
use super::enums::{FtMode, Geometry, NormalisationType, OutputUnits};
use super::geometry::{GeometryBearing, GeometryBlock};
use crate::gudrun::naming;
use serde::{Deserialize, Serialize};

/// Wavelength window excluded around a resonance, in Å.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResonanceRange {
    pub min_wavelength: f64,
    pub max_wavelength: f64,
}

/// One term of the exponential subtracted from the self scattering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExponentialTerm {
    pub amplitude: f64,
    pub decay: f64,
    pub n: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sample {
    pub name: String,
    pub period_number: u32,
    pub data_files: DataFiles,
    pub force_calculation_of_corrections: bool,
    pub composition: Composition,
    #[serde(flatten)]
    pub geometry: GeometryBlock,
    pub density: Density,
    pub temp_for_normalisation_pc: f64,
    pub total_cross_section_source: CrossSectionSource,
    pub sample_tweak_factor: f64,
    pub top_hat_w: f64,
    #[serde(rename = "FTMode")]
    pub ft_mode: FtMode,
    pub min_rad_ft: f64,
    pub gr_broadening: f64,
    pub resonance_values: Vec<ResonanceRange>,
    pub exponential_values: Vec<ExponentialTerm>,
    pub normalisation_correction_factor: f64,
    pub file_self_scattering: String,
    pub normalise_to: NormalisationType,
    pub max_rad_ft: f64,
    pub output_units: OutputUnits,
    pub power_for_broadening: f64,
    pub step_size: f64,
    pub run_this_sample: bool,
    pub scattering_fraction: f64,
    pub attenuation_coefficient: f64,
    pub containers: Vec<Container>,
}

impl Sample {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            data_files: DataFiles::new(name.clone()),
            name,
            ..Self::default()
        }
    }

    /// File name of the per-sample parameter file written for processing.
    pub fn path_name(&self) -> String {
        format!("{}.txt", naming::sanitise_name(&self.name))
    }

    /// The signed top-hat width as stored on disk.
    pub fn encoded_top_hat_width(&self) -> f64 {
        self.ft_mode.encode(self.top_hat_w)
    }

    pub fn set_encoded_top_hat_width(&mut self, raw: f64) {
        let (mode, width) = FtMode::decode(raw);
        self.ft_mode = mode;
        self.top_hat_w = width;
    }
}

impl Default for Sample {
    fn default() -> Self {
        Self {
            name: "SAMPLE".to_string(),
            period_number: 1,
            data_files: DataFiles::new("SAMPLE"),
            force_calculation_of_corrections: true,
            composition: Composition::new("Sample"),
            geometry: GeometryBlock::new(Geometry::SameAsBeam),
            density: Density::default(),
            temp_for_normalisation_pc: 0.0,
            total_cross_section_source: CrossSectionSource::Transmission,
            sample_tweak_factor: 1.0,
            top_hat_w: 0.0,
            ft_mode: FtMode::NoTransform,
            min_rad_ft: 0.0,
            gr_broadening: 0.0,
            resonance_values: Vec::new(),
            exponential_values: Vec::new(),
            normalisation_correction_factor: 1.0,
            file_self_scattering: "*".to_string(),
            normalise_to: NormalisationType::Nothing,
            max_rad_ft: 0.0,
            output_units: OutputUnits::BarnsAtomSr,
            power_for_broadening: 0.0,
            step_size: 0.0,
            run_this_sample: true,
            scattering_fraction: 1.0,
            attenuation_coefficient: 0.0,
            containers: Vec::new(),
        }
    }
}

impl GeometryBearing for Sample {
    fn geometry_block(&self) -> &GeometryBlock {
        &self.geometry
    }

    fn geometry_block_mut(&mut self) -> &mut GeometryBlock {
        &mut self.geometry
    }
}
