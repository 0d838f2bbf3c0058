//! Board cut lengths and reel widths.
//!
//! Inputs are the raw (unshrunk) box dimensions in centimetres; outputs are
//! inches, the unit the corrugator and reel stock are sized in.

use serde::{Deserialize, Serialize};

use crate::dimensions::BoxDimensions;

pub const CM_PER_INCH: f64 = 2.54;
/// Square inches in one square metre (rounded the way the shop floor uses it).
pub const SQ_IN_PER_SQ_M: f64 = 1550.0;

/// Glue flap plus trim added to a full-length (two panel pairs) board.
const FULL_LENGTH_ALLOWANCE_CM: f64 = 3.5 + 0.5;
/// Glue flap plus trim added to a half-length (one panel pair) board.
const HALF_LENGTH_ALLOWANCE_CM: f64 = 3.5 + 0.4;
const REEL_TRIM_CM: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardSizes {
    pub full_length_in: f64,
    pub half_length_in: f64,
    pub reel_1up_in: f64,
    pub reel_2up_in: f64,
    /// Breadth plus height; drives the UPS classification.
    pub reel_width_in: f64,
}

impl BoardSizes {
    pub fn compute(dims: &BoxDimensions) -> Self {
        let BoxDimensions {
            length_cm: l,
            breadth_cm: b,
            height_cm: h,
        } = *dims;
        let flute = dims.flute_size_cm();
        let deckle = h + flute + flute;

        Self {
            full_length_in: ((l + b) * 2.0 + FULL_LENGTH_ALLOWANCE_CM) / CM_PER_INCH,
            half_length_in: ((l + b) + HALF_LENGTH_ALLOWANCE_CM) / CM_PER_INCH,
            reel_1up_in: (deckle + REEL_TRIM_CM) / CM_PER_INCH,
            reel_2up_in: (deckle * 2.0 + REEL_TRIM_CM) / CM_PER_INCH,
            reel_width_in: (b + h) / CM_PER_INCH,
        }
    }

    /// Board area used for paper weights: full length × reel width.
    pub fn area_sq_in(&self) -> f64 {
        self.full_length_in * self.reel_width_in
    }

    pub fn area_sq_m(&self) -> f64 {
        self.area_sq_in() / SQ_IN_PER_SQ_M
    }
}
