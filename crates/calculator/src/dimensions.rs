//! Box dimensions, shrinkage allowance and flute size.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use corrugate_core::{DomainError, DomainResult, ValueObject};

use crate::config::CalculatorConfig;

/// Empirical flute size constants (cm): `(breadth + 0.635) * 1.013575 / 2`.
const FLUTE_BREADTH_ALLOWANCE_CM: f64 = 0.635;
const FLUTE_STRETCH: f64 = 1.013575;

/// Corrugation profile of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FluteType {
    A,
    #[default]
    B,
    C,
}

impl core::fmt::Display for FluteType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            FluteType::A => "A",
            FluteType::B => "B",
            FluteType::C => "C",
        };
        f.write_str(s)
    }
}

impl FromStr for FluteType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(FluteType::A),
            "B" => Ok(FluteType::B),
            "C" => Ok(FluteType::C),
            other => Err(DomainError::validation(format!(
                "flute type must be one of A, B, C (got {other:?})"
            ))),
        }
    }
}

/// Finished box size in centimetres, as ordered by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDimensions {
    pub length_cm: f64,
    pub breadth_cm: f64,
    pub height_cm: f64,
}

impl ValueObject for BoxDimensions {}

impl BoxDimensions {
    pub fn new(length_cm: f64, breadth_cm: f64, height_cm: f64) -> DomainResult<Self> {
        let dims = Self {
            length_cm,
            breadth_cm,
            height_cm,
        };
        dims.validate()?;
        Ok(dims)
    }

    pub fn validate(&self) -> DomainResult<()> {
        DomainError::ensure_positive("length", self.length_cm)?;
        DomainError::ensure_positive("breadth", self.breadth_cm)?;
        DomainError::ensure_positive("height", self.height_cm)?;
        Ok(())
    }

    /// Dimensions grown by the configured shrinkage allowances.
    pub fn shrunk(&self, config: &CalculatorConfig) -> ShrunkDimensions {
        ShrunkDimensions {
            length_cm: self.length_cm * config.length_shrinkage,
            breadth_cm: self.breadth_cm * config.breadth_shrinkage,
            height_cm: self.height_cm * config.height_shrinkage,
            flute_size_cm: self.flute_size_cm(),
        }
    }

    /// Flap depth contributed by the flute, derived from the raw breadth.
    pub fn flute_size_cm(&self) -> f64 {
        (self.breadth_cm + FLUTE_BREADTH_ALLOWANCE_CM) * FLUTE_STRETCH / 2.0
    }

    /// Outer surface of the closed box in square metres: `2(lb + lh + bh)`.
    pub fn surface_area_m2(&self) -> f64 {
        let l = self.length_cm / 100.0;
        let b = self.breadth_cm / 100.0;
        let h = self.height_cm / 100.0;
        2.0 * (l * b + l * h + b * h)
    }
}

/// Shrinkage-adjusted dimensions plus the flute size, all in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShrunkDimensions {
    pub length_cm: f64,
    pub breadth_cm: f64,
    pub height_cm: f64,
    pub flute_size_cm: f64,
}
