use super::enums::Geometry;
use serde::{Deserialize, Serialize};

/// Positions of the four edges of a beam, in cm.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamEdges {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl BeamEdges {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.left, self.right, self.bottom, self.top]
    }
}

/// Incident beam description. Its `sample_geometry` is what `SameAsBeam` refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Beam {
    pub sample_geometry: Geometry,
    pub beam_profile_values: Vec<f64>,
    pub step_size_absorption: f64,
    pub step_size_ms: f64,
    pub no_slices_penetration: u32,
    pub angular_step_for_corrections: u32,
    pub incident_beam_edges: BeamEdges,
    pub scattered_beam_edges: BeamEdges,
    pub filename_incident_beam_spectrum_params: String,
    pub overall_background_factor: f64,
    pub sample_dependent_background_factor: f64,
    pub shielding_attenuation_coefficient: f64,
}

impl Default for Beam {
    fn default() -> Self {
        Self {
            sample_geometry: Geometry::FlatPlate,
            beam_profile_values: vec![1.0, 1.0],
            step_size_absorption: 0.05,
            step_size_ms: 0.2,
            no_slices_penetration: 100,
            angular_step_for_corrections: 10,
            incident_beam_edges: BeamEdges::new(-1.5, 1.5, -1.5, 1.5),
            scattered_beam_edges: BeamEdges::new(-2.0, 2.0, -2.1, 2.1),
            filename_incident_beam_spectrum_params: "*".to_string(),
            overall_background_factor: 1.0,
            sample_dependent_background_factor: 0.0,
            shielding_attenuation_coefficient: 0.0,
        }
    }
}
