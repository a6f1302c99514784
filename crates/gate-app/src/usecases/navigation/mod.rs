//! Navigation gate use cases.
//!
//! The side-effecting half of the gate: a watcher that gathers a consistent
//! input snapshot, asks the pure state machine for a decision, and applies
//! at most one redirect per input change.

pub mod signal;
pub mod watcher;

pub use signal::OnboardingSignal;
pub use watcher::{GateEvaluation, NavigationGateWatcher, NavigationGateWatcherDeps};
