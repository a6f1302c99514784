//! Session use cases.
//!
//! Explicit user actions that write the identity cache. Unlike bootstrap,
//! these report failures to their caller.

pub mod establish;
pub mod issue_anonymous;
pub mod sign_out;

pub use establish::EstablishSession;
pub use issue_anonymous::IssueAnonymousSession;
pub use sign_out::SignOut;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to persist credentials")]
    Persist(#[source] anyhow::Error),

    #[error("failed to clear persisted session state")]
    Clear(#[source] anyhow::Error),

    #[error("network client rejected the session")]
    Network(#[source] anyhow::Error),

    #[error("identity issuer failed")]
    Issue(#[source] anyhow::Error),

    #[error("access token is empty")]
    EmptyToken,
}
