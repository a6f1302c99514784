//! Host bootstrap: configuration loading, tracing setup and dependency wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_config_or_default, CONFIG_ENV};
pub use wiring::GateRuntime;
