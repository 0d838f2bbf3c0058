//! `corrugate` command-line front end.

pub mod args;
pub mod commands;

pub use args::{BoxArgs, Cli, Commands, ConfigArgs, OrderArgs};
pub use commands::{QuoteSummary, run_calculate, run_quote};
