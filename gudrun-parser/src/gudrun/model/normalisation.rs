use super::composition::Composition;
use super::cross_section::CrossSectionSource;
use super::data_files::DataFiles;
use super::density::{Density, DensityUnits};
use super::enums::Geometry;
use super::geometry::{GeometryBearing, GeometryBlock};
use serde::{Deserialize, Serialize};

/// The vanadium normalisation measurement and its background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Normalisation {
    pub period_number: u32,
    pub data_files: DataFiles,
    pub period_number_bg: u32,
    pub data_files_bg: DataFiles,
    pub force_calculation_of_corrections: bool,
    pub composition: Composition,
    #[serde(flatten)]
    pub geometry: GeometryBlock,
    pub density: Density,
    pub temp_for_normalisation_pc: f64,
    pub total_cross_section_source: CrossSectionSource,
    pub normalisation_differential_cross_section_file: String,
    pub lower_limit_smoothed_normalisation: f64,
    pub normalisation_degree_smoothing: f64,
    pub min_normalisation_signal_background_ratio: f64,
}

impl Default for Normalisation {
    fn default() -> Self {
        Self {
            period_number: 1,
            data_files: DataFiles::new("NORMALISATION"),
            period_number_bg: 1,
            data_files_bg: DataFiles::new("NORMALISATION BACKGROUND"),
            force_calculation_of_corrections: true,
            composition: Composition::new("Normalisation"),
            geometry: GeometryBlock::new(Geometry::SameAsBeam),
            density: Density::new(0.0721, DensityUnits::Atomic),
            temp_for_normalisation_pc: 0.0,
            total_cross_section_source: CrossSectionSource::Tables,
            normalisation_differential_cross_section_file: "*".to_string(),
            lower_limit_smoothed_normalisation: 0.01,
            normalisation_degree_smoothing: 1.0,
            min_normalisation_signal_background_ratio: 0.0,
        }
    }
}

impl GeometryBearing for Normalisation {
    fn geometry_block(&self) -> &GeometryBlock {
        &self.geometry
    }

    fn geometry_block_mut(&mut self) -> &mut GeometryBlock {
        &mut self.geometry
    }
}
