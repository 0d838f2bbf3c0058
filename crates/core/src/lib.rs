//! `corrugate-core`: shared domain building blocks.
//!
//! Pure domain primitives only: errors, identifiers and the small traits the
//! catalog, order and inventory crates build their records on.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::AggregateId;
pub use money::{round_amount, sum_amounts};
pub use rust_decimal::Decimal;
pub use value_object::ValueObject;
