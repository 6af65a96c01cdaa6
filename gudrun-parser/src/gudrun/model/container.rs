use super::composition::Composition;
use super::cross_section::CrossSectionSource;
use super::data_files::DataFiles;
use super::density::{Density, DensityUnits};
use super::enums::{FtMode, Geometry};
use super::geometry::{GeometryBearing, GeometryBlock};
use super::sample::{ExponentialTerm, Sample};
use serde::{Deserialize, Serialize};

/// The can a sample is measured in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Container {
    pub name: String,
    pub period_number: u32,
    pub data_files: DataFiles,
    pub composition: Composition,
    #[serde(flatten)]
    pub geometry: GeometryBlock,
    pub density: Density,
    pub total_cross_section_source: CrossSectionSource,
    pub tweak_factor: f64,
    pub scattering_fraction: f64,
    pub attenuation_coefficient: f64,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            data_files: DataFiles::new(name.clone()),
            name,
            ..Self::default()
        }
    }

    /// Build a Sample that measures this container on its own.
    pub fn to_sample(&self) -> Sample {
        Sample {
            name: self.name.clone(),
            period_number: self.period_number,
            data_files: self.data_files.clone(),
            force_calculation_of_corrections: true,
            composition: self.composition.clone(),
            geometry: self.geometry.clone(),
            density: self.density,
            total_cross_section_source: self.total_cross_section_source.clone(),
            sample_tweak_factor: self.tweak_factor,
            top_hat_w: 0.0,
            ft_mode: FtMode::SubtractAverage,
            min_rad_ft: 0.0,
            max_rad_ft: 0.0,
            gr_broadening: 0.0,
            power_for_broadening: 0.0,
            step_size: 0.0,
            exponential_values: vec![ExponentialTerm {
                amplitude: 0.0,
                decay: 1.0,
                n: 0,
            }],
            normalisation_correction_factor: 1.0,
            file_self_scattering: "*".to_string(),
            scattering_fraction: 1.0,
            ..Sample::default()
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self {
            name: "CONTAINER".to_string(),
            period_number: 1,
            data_files: DataFiles::new("CONTAINER"),
            composition: Composition::new("Container"),
            geometry: GeometryBlock::new(Geometry::SameAsBeam),
            density: Density::new(0.0542, DensityUnits::Atomic),
            total_cross_section_source: CrossSectionSource::Tables,
            tweak_factor: 1.0,
            scattering_fraction: 0.0,
            attenuation_coefficient: 0.0,
        }
    }
}

impl GeometryBearing for Container {
    fn geometry_block(&self) -> &GeometryBlock {
        &self.geometry
    }

    fn geometry_block_mut(&mut self) -> &mut GeometryBlock {
        &mut self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gudrun::model::element::Element;

    #[test]
    fn to_sample_carries_measurement_over() {
        let mut container = Container::new("V can");
        container.data_files = DataFiles::new("V can").with_files(["NIMROD001.raw"]);
        container.composition =
            Composition::new("Container").with_elements(vec![Element::new("V", 0, 1.0)]);
        container.tweak_factor = 0.9;

        let sample = container.to_sample();
        assert_eq!(sample.name, "V can");
        assert_eq!(sample.data_files.files, vec!["NIMROD001.raw"]);
        assert_eq!(sample.composition, container.composition);
        assert_eq!(sample.sample_tweak_factor, 0.9);
        assert!(sample.force_calculation_of_corrections);
        assert!(sample.containers.is_empty());
        assert_eq!(sample.exponential_values.len(), 1);
    }

    #[test]
    fn to_sample_zeroes_fourier_transform_settings() {
        let sample = Container::new("can").to_sample();
        assert_eq!(
            [
                sample.top_hat_w,
                sample.min_rad_ft,
                sample.max_rad_ft,
                sample.gr_broadening,
                sample.power_for_broadening,
                sample.step_size,
            ],
            [0.0; 6]
        );
    }
}
