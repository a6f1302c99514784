//! Network client adapters.

pub mod credential_cache;

pub use credential_cache::InMemoryCredentialCache;
