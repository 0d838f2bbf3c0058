//! Inventory stock records.
//!
//! Stock lines are plain entities (no IO, no storage). Each carries the
//! purchase price inputs and the landed price computed from them.

pub mod stock;

pub use stock::{LandedPrice, StockKind, StockLine, StockLineId, StockPricing};
