//! Identity issuing adapters.

pub mod local_issuer;

pub use local_issuer::LocalIdentityIssuer;
