//! Customer box orders (event-sourced) and their denormalized costing.
//!
//! `order.rs` holds the order lifecycle; `costing.rs` turns a template and a
//! quantity into the material requirement and manufacturing cost records
//! stored alongside the order.

pub mod costing;
pub mod order;

pub use costing::{CostingExtras, ManufacturingCost, MaterialRequirement, OrderCosting, cost_order};
pub use order::{
    BoxOrder, ChangeStatus, CostingRecorded, OrderCommand, OrderEvent, OrderId, OrderPlaced,
    OrderStatus, PlaceOrder, RecordCosting, StatusChanged,
};
