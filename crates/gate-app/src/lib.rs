//! # gate-app
//!
//! Application orchestration for bootgate: the identity cache, the display
//! readiness barrier, and the use cases that sequence cold start and keep
//! the router in line with the session.

pub mod identity_cache;
pub mod readiness;
pub mod usecases;

pub use identity_cache::{IdentityCache, RestorationTicket};
pub use readiness::DisplayReadiness;
