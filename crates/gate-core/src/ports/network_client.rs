use async_trait::async_trait;

use crate::identity::AccessToken;
use crate::ids::IdentityId;

/// Credential cache of the remote API client.
#[async_trait]
pub trait NetworkClientPort: Send + Sync {
    /// Warm up the client's credential cache. Idempotent.
    async fn init_credential_cache(&self) -> anyhow::Result<()>;

    /// Register a session for subsequent authenticated calls.
    async fn set_credential_cache(
        &self,
        token: &AccessToken,
        identity_id: &IdentityId,
    ) -> anyhow::Result<()>;

    /// Drop any registered session.
    async fn clear_credential_cache(&self) -> anyhow::Result<()>;
}
