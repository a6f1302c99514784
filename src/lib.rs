//! bootgate host library
//!
//! Wires the gate crates into a runnable process: configuration, tracing,
//! concrete adapters and the headless router.

pub mod bootstrap;
pub mod router;

pub use bootstrap::GateRuntime;
pub use router::HeadlessRouter;
