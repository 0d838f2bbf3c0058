//! Box dimension & cost calculator.
//!
//! Turns box dimensions, flute type, ply count and paper GSMs into board cut
//! sizes, reel widths, a UPS layout, per-layer paper weights and a cost
//! rollup. Everything here is pure arithmetic over validated input: no IO, no
//! shared state.
//!
//! - `config.rs`: empirical factors and default prices
//! - `dimensions.rs`: shrinkage, flute size, surface area
//! - `board.rs`: board lengths and reel widths (inches)
//! - `ups.rs`: cutting layout classification
//! - `paper.rs`: ply layouts, paper specs, layer weights
//! - `cost.rs`: material/labor rollup and suggested price
//! - `calculate.rs`: the entrypoint tying the steps together
//! - `formulas.rs`: human-readable working for each step

pub mod board;
pub mod calculate;
pub mod config;
pub mod cost;
pub mod dimensions;
pub mod formulas;
pub mod paper;
pub mod ups;

pub use board::BoardSizes;
pub use calculate::{BoxParameters, CalculationResult, calculate};
pub use config::CalculatorConfig;
pub use cost::{CostEstimate, suggested_price};
pub use dimensions::{BoxDimensions, FluteType, ShrunkDimensions};
pub use formulas::CalculationFormulas;
pub use paper::{LayerRequirement, LayerSpec, PaperLayer, PaperRequirement, PaperSpec, PlyCount};
pub use ups::Ups;
