//! Domain events emitted by the template and order aggregates.

pub mod event;

pub use event::Event;
