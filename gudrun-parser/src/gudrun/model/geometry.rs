//! The flat-plate / cylindrical shape shared by Normalisation, Sample and Container.

use super::enums::Geometry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatPlate {
    pub upstream_thickness: f64,
    pub downstream_thickness: f64,
    pub angle_of_rotation: f64,
    pub sample_width: f64,
}

impl Default for FlatPlate {
    fn default() -> Self {
        Self {
            upstream_thickness: 0.05,
            downstream_thickness: 0.05,
            angle_of_rotation: 0.0,
            sample_width: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cylindrical {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub sample_height: f64,
}

/// Geometry discriminator plus both field groups.
///
/// Only one group is active at a time: the one selected by `geometry`, with
/// `SameAsBeam` resolved against the document's beam geometry. The inactive group keeps
/// its values so that switching shapes in an editor is not destructive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryBlock {
    pub geometry: Geometry,
    #[serde(flatten)]
    pub flat_plate: FlatPlate,
    #[serde(flatten)]
    pub cylindrical: Cylindrical,
}

impl GeometryBlock {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            ..Self::default()
        }
    }

    /// The concrete shape whose fields appear on disk.
    pub fn active(&self, beam_geometry: Geometry) -> Geometry {
        self.geometry.resolve(beam_geometry)
    }
}

/// Records that own a [`GeometryBlock`].
pub trait GeometryBearing {
    fn geometry_block(&self) -> &GeometryBlock;
    fn geometry_block_mut(&mut self) -> &mut GeometryBlock;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_group_follows_beam_for_same_as_beam() {
        let block = GeometryBlock::new(Geometry::SameAsBeam);
        assert_eq!(block.active(Geometry::Cylindrical), Geometry::Cylindrical);
        assert_eq!(block.active(Geometry::FlatPlate), Geometry::FlatPlate);

        let block = GeometryBlock::new(Geometry::Cylindrical);
        assert_eq!(block.active(Geometry::FlatPlate), Geometry::Cylindrical);
    }
}
