//! In-process credential cache for the remote API client.
//!
//! Holds the bearer token that authenticated requests attach. Registering a
//! session replaces the previous one.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use gate_core::ports::NetworkClientPort;
use gate_core::{AccessToken, IdentityId};
use tokio::sync::RwLock;
use tracing::debug;

struct CachedCredential {
    token: AccessToken,
    identity_id: IdentityId,
}

#[derive(Default)]
pub struct InMemoryCredentialCache {
    initialized: AtomicBool,
    current: RwLock<Option<CachedCredential>>,
}

impl InMemoryCredentialCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub async fn identity_id(&self) -> Option<IdentityId> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|cached| cached.identity_id.clone())
    }

    /// `Authorization` header value for the registered session.
    pub async fn authorization_header(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|cached| format!("Bearer {}", cached.token.expose()))
    }
}

#[async_trait]
impl NetworkClientPort for InMemoryCredentialCache {
    async fn init_credential_cache(&self) -> anyhow::Result<()> {
        if !self.initialized.swap(true, Ordering::SeqCst) {
            debug!("credential cache initialized");
        }
        Ok(())
    }

    async fn set_credential_cache(
        &self,
        token: &AccessToken,
        identity_id: &IdentityId,
    ) -> anyhow::Result<()> {
        *self.current.write().await = Some(CachedCredential {
            token: token.clone(),
            identity_id: identity_id.clone(),
        });
        debug!(identity_id = %identity_id, "credential registered");
        Ok(())
    }

    async fn clear_credential_cache(&self) -> anyhow::Result<()> {
        if self.current.write().await.take().is_some() {
            debug!("credential cleared");
        }
        Ok(())
    }
}
