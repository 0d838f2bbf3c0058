//! UPS: how boards are laid out across the reel.

use serde::{Deserialize, Serialize};

use crate::board::BoardSizes;

/// Reel widths (inches) below which each layout applies.
pub const TWO_BOARD_MAX_REEL_IN: f64 = 20.0;
pub const ONE_BOARD_MAX_REEL_IN: f64 = 40.0;
pub const FULL_LENGTH_MAX_REEL_IN: f64 = 60.0;
/// Past the widest reel, boards longer than this are cut as half lengths.
pub const HALF_LENGTH_MIN_BOARD_IN: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ups {
    TwoBoardLength,
    OneBoardLength,
    FullLength,
    HalfLength,
}

impl Ups {
    /// Classify from the computed reel width and full board length (inches).
    pub fn classify(reel_width_in: f64, full_length_in: f64) -> Self {
        if reel_width_in < TWO_BOARD_MAX_REEL_IN {
            Ups::TwoBoardLength
        } else if reel_width_in < ONE_BOARD_MAX_REEL_IN {
            Ups::OneBoardLength
        } else if reel_width_in < FULL_LENGTH_MAX_REEL_IN {
            Ups::FullLength
        } else if full_length_in > HALF_LENGTH_MIN_BOARD_IN {
            Ups::HalfLength
        } else {
            Ups::FullLength
        }
    }

    pub fn for_board(board: &BoardSizes) -> Self {
        Self::classify(board.reel_width_in, board.full_length_in)
    }

    pub fn label(self) -> &'static str {
        match self {
            Ups::TwoBoardLength => "2 board length",
            Ups::OneBoardLength => "1 board length",
            Ups::FullLength => "full length",
            Ups::HalfLength => "half length",
        }
    }

    /// Which threshold decided the classification, with the measured values.
    pub fn reason(reel_width_in: f64, full_length_in: f64) -> String {
        let ups = Self::classify(reel_width_in, full_length_in);
        if reel_width_in < TWO_BOARD_MAX_REEL_IN {
            format!("Reel Width ({reel_width_in:.4}\") < 20\" → {}", ups.label())
        } else if reel_width_in < ONE_BOARD_MAX_REEL_IN {
            format!("20\" ≤ Reel Width ({reel_width_in:.4}\") < 40\" → {}", ups.label())
        } else if reel_width_in < FULL_LENGTH_MAX_REEL_IN {
            format!("Reel Width ({reel_width_in:.4}\") < 60\" → {}", ups.label())
        } else if full_length_in > HALF_LENGTH_MIN_BOARD_IN {
            format!("Full Length ({full_length_in:.4}\") > 60\" → {}", ups.label())
        } else {
            format!("Reel Width ({reel_width_in:.4}\") ≥ 60\", Full Length ≤ 60\" → {}", ups.label())
        }
    }
}

impl core::fmt::Display for Ups {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
