//! # gate-infra
//!
//! Infrastructure adapters for bootgate: file-backed credential and theme
//! stores, platform directory resolution, the in-process network credential
//! cache, and a local anonymous identity issuer.

pub mod fs;
pub mod identity;
pub mod network;

pub use fs::{AppPaths, FileCredentialStore, FileThemeRepository};
pub use identity::LocalIdentityIssuer;
pub use network::InMemoryCredentialCache;
