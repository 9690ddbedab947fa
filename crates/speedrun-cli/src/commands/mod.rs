//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod collect;
pub mod dashboard;
pub mod run;
