//! Command-line driver for the atp plugin rules.

pub mod args;
pub mod driver;
pub mod fixture;
pub mod reporter;
pub mod tracing_config;
