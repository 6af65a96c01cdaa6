//! Enumerations carried by Gudrun records.
//!
//! Two on-disk encodings exist. Name-coded enums ([`InstrumentName`], [`Geometry`]) are
//! written as their upper-case token. Integer-coded enums ([`MergeWeights`], [`Scales`],
//! [`NormalisationType`], [`OutputUnits`]) are written as their numeric code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruments Gudrun knows how to correct data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentName {
    #[default]
    Sandals,
    Gem,
    Nimrod,
    D4c,
    Polaris,
    Sls,
    Wish,
    Hipr,
    Osiris,
}

impl InstrumentName {
    pub const ALL: [InstrumentName; 9] = [
        InstrumentName::Sandals,
        InstrumentName::Gem,
        InstrumentName::Nimrod,
        InstrumentName::D4c,
        InstrumentName::Polaris,
        InstrumentName::Sls,
        InstrumentName::Wish,
        InstrumentName::Hipr,
        InstrumentName::Osiris,
    ];

    pub fn token(self) -> &'static str {
        match self {
            InstrumentName::Sandals => "SANDALS",
            InstrumentName::Gem => "GEM",
            InstrumentName::Nimrod => "NIMROD",
            InstrumentName::D4c => "D4C",
            InstrumentName::Polaris => "POLARIS",
            InstrumentName::Sls => "SLS",
            InstrumentName::Wish => "WISH",
            InstrumentName::Hipr => "HIPR",
            InstrumentName::Osiris => "OSIRIS",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.token() == token)
    }
}

impl fmt::Display for InstrumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Shape of a sample, container or normalisation.
///
/// `SameAsBeam` defers to the geometry declared by the Beam record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Geometry {
    #[default]
    #[serde(rename = "FLATPLATE")]
    FlatPlate,
    #[serde(rename = "CYLINDRICAL")]
    Cylindrical,
    #[serde(rename = "SameAsBeam")]
    SameAsBeam,
}

impl Geometry {
    pub fn token(self) -> &'static str {
        match self {
            Geometry::FlatPlate => "FLATPLATE",
            Geometry::Cylindrical => "CYLINDRICAL",
            Geometry::SameAsBeam => "SameAsBeam",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "FLATPLATE" => Some(Geometry::FlatPlate),
            "CYLINDRICAL" => Some(Geometry::Cylindrical),
            "SameAsBeam" => Some(Geometry::SameAsBeam),
            _ => None,
        }
    }

    /// The concrete shape in effect once `SameAsBeam` is resolved against `beam`.
    pub fn resolve(self, beam: Geometry) -> Geometry {
        match self {
            Geometry::SameAsBeam => beam,
            concrete => concrete,
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Integer-coded enums share one reading/writing shape.
pub trait Coded: Sized + Copy + 'static {
    const VARIANTS: &'static [Self];
    /// Used in diagnostics when a code is not recognised.
    const DESCRIPTION: &'static str;

    fn code(self) -> i64;

    fn from_code(code: i64) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeWeights {
    #[default]
    None,
    Detector,
    Channel,
}

impl Coded for MergeWeights {
    const VARIANTS: &'static [Self] = &[
        MergeWeights::None,
        MergeWeights::Detector,
        MergeWeights::Channel,
    ];
    const DESCRIPTION: &'static str = "merge weights";

    fn code(self) -> i64 {
        match self {
            MergeWeights::None => 0,
            MergeWeights::Detector => 1,
            MergeWeights::Channel => 2,
        }
    }
}

/// X-scale the final results are binned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scales {
    #[default]
    Q,
    DSpacing,
    Wavelength,
    Energy,
    Tof,
}

impl Coded for Scales {
    const VARIANTS: &'static [Self] = &[
        Scales::Q,
        Scales::DSpacing,
        Scales::Wavelength,
        Scales::Energy,
        Scales::Tof,
    ];
    const DESCRIPTION: &'static str = "scale selection";

    fn code(self) -> i64 {
        match self {
            Scales::Q => 1,
            Scales::DSpacing => 2,
            Scales::Wavelength => 3,
            Scales::Energy => 4,
            Scales::Tof => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NormalisationType {
    #[default]
    Nothing,
    AverageSquared,
    AverageOfSquares,
}

impl Coded for NormalisationType {
    const VARIANTS: &'static [Self] = &[
        NormalisationType::Nothing,
        NormalisationType::AverageSquared,
        NormalisationType::AverageOfSquares,
    ];
    const DESCRIPTION: &'static str = "normalisation type";

    fn code(self) -> i64 {
        match self {
            NormalisationType::Nothing => 0,
            NormalisationType::AverageSquared => 1,
            NormalisationType::AverageOfSquares => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputUnits {
    #[default]
    BarnsAtomSr,
    InvCmSr,
}

impl Coded for OutputUnits {
    const VARIANTS: &'static [Self] = &[OutputUnits::BarnsAtomSr, OutputUnits::InvCmSr];
    const DESCRIPTION: &'static str = "output units";

    fn code(self) -> i64 {
        match self {
            OutputUnits::BarnsAtomSr => 0,
            OutputUnits::InvCmSr => 1,
        }
    }
}

/// How the Fourier transform is cleaned up; encoded on disk by the sign of the top-hat width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FtMode {
    NoTransform,
    #[default]
    SubtractAverage,
    Absolute,
}

impl FtMode {
    /// Split a signed top-hat width token into `(mode, width)`.
    pub fn decode(raw: f64) -> (FtMode, f64) {
        if raw == 0.0 {
            (FtMode::NoTransform, 0.0)
        } else if raw < 0.0 {
            (FtMode::SubtractAverage, raw.abs())
        } else {
            (FtMode::Absolute, raw)
        }
    }

    /// Inverse of [`FtMode::decode`].
    pub fn encode(self, width: f64) -> f64 {
        match self {
            FtMode::NoTransform => 0.0,
            FtMode::SubtractAverage => -width.abs(),
            FtMode::Absolute => width.abs(),
        }
    }
}
