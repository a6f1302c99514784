//! # gate-core
//!
//! Core domain models and decision logic for bootgate.
//!
//! This crate contains the pure navigation gate state machine, the session
//! and identity model, and the port traits implemented by the infrastructure
//! layer. It performs no I/O.

pub mod config;
pub mod error;
pub mod identity;
pub mod ids;
pub mod navigation;
pub mod ports;
pub mod readiness;
pub mod session;
pub mod theme;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use error::{NavigationError, ReadinessError};
pub use identity::{AccessToken, Identity, IdentityKind};
pub use ids::IdentityId;
pub use navigation::{
    GateDecision, GateInputs, GateOutcome, GateState, GateStateMachine, OnboardingCheck, Route,
    RouteGroup,
};
pub use readiness::ReadinessSource;
pub use session::{SessionEpoch, SessionSnapshot};
pub use theme::Theme;
