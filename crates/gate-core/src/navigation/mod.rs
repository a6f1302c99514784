//! Navigation domain module.
//!
//! Route model and the pure gate state machine that maps session and
//! onboarding status to at most one redirect.

pub mod route;
pub mod state_machine;

pub use route::{Route, RouteGroup};
pub use state_machine::{
    GateDecision, GateInputs, GateOutcome, GateState, GateStateMachine, OnboardingCheck,
};
