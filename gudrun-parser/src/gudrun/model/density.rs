use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DensityUnits {
    /// atoms/Å^3, written as a negative number.
    #[default]
    Atomic,
    /// gm/cm^3, written as a non-negative number.
    Chemical,
}

impl DensityUnits {
    pub fn label(self) -> &'static str {
        match self {
            DensityUnits::Atomic => "atoms/\u{212b}^3",
            DensityUnits::Chemical => "gm/cm^3",
        }
    }
}

/// Density magnitude with its units. On disk this is one signed float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Density {
    pub magnitude: f64,
    pub units: DensityUnits,
}

impl Density {
    pub fn new(magnitude: f64, units: DensityUnits) -> Self {
        Self {
            magnitude: magnitude.abs(),
            units,
        }
    }

    /// Negative values are atomic densities; zero and above are chemical.
    pub fn from_signed(raw: f64) -> Self {
        let units = if raw < 0.0 {
            DensityUnits::Atomic
        } else {
            DensityUnits::Chemical
        };
        Self {
            magnitude: raw.abs(),
            units,
        }
    }

    pub fn signed(self) -> f64 {
        match self.units {
            DensityUnits::Atomic => -self.magnitude,
            DensityUnits::Chemical => self.magnitude,
        }
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::new(0.1, DensityUnits::Atomic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-0.0542, 0.0542, DensityUnits::Atomic)]
    #[case(0.0542, 0.0542, DensityUnits::Chemical)]
    #[case(0.0, 0.0, DensityUnits::Chemical)]
    fn sign_selects_units(#[case] raw: f64, #[case] magnitude: f64, #[case] units: DensityUnits) {
        let density = Density::from_signed(raw);
        assert_eq!(density, Density { magnitude, units });
        assert_eq!(density.signed(), raw);
    }

    #[test]
    fn labels() {
        assert_eq!(DensityUnits::Atomic.label(), "atoms/\u{212b}^3");
        assert_eq!(DensityUnits::Chemical.label(), "gm/cm^3");
    }
}
