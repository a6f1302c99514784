//! Port interfaces for the application layer
//!
//! Ports define the contract between the decision engine and the external
//! collaborators it depends on: durable credential storage, the network
//! client's credential cache, the router, the theme preference store and the
//! identity issuer. Implementations live in the infrastructure layer or the
//! host.

pub mod credential_store;
pub mod identity_issuer;
pub mod network_client;
pub mod router;
pub mod theme;

pub use credential_store::{CredentialStorePort, StoredCredentials};
pub use identity_issuer::{IdentityIssuerPort, IssuedIdentity};
pub use network_client::NetworkClientPort;
pub use router::RouterPort;
pub use theme::ThemePreferencePort;
