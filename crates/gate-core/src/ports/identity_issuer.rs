use async_trait::async_trait;

use crate::identity::{AccessToken, Identity};

/// Freshly issued identity together with its token.
#[derive(Debug, Clone)]
pub struct IssuedIdentity {
    pub identity: Identity,
    pub access_token: AccessToken,
}

/// Issues anonymous identities (remote auth service in production).
#[async_trait]
pub trait IdentityIssuerPort: Send + Sync {
    async fn issue_anonymous(&self) -> anyhow::Result<IssuedIdentity>;
}
