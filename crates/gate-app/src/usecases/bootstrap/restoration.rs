//! Credential restoration strategies.

use std::sync::Arc;

use async_trait::async_trait;
use gate_core::ports::CredentialStorePort;
use gate_core::{AccessToken, Identity, ReadinessError};
use tracing::{debug, info};

/// Where a restored session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestorationOrigin {
    /// Read back from the credential store.
    Stored,
    /// Fabricated locally; never registered with the network client.
    Synthesized,
}

/// Session recovered at cold start.
#[derive(Debug, Clone)]
pub struct RestoredSession {
    pub identity: Identity,
    pub access_token: AccessToken,
    pub origin: RestorationOrigin,
}

/// Produces the session, if any, that bootstrap should install.
///
/// `Ok(None)` means "no session" and is a valid terminal outcome.
#[async_trait]
pub trait RestorationStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn restore(&self) -> Result<Option<RestoredSession>, ReadinessError>;
}

/// Production strategy: rebuild a partial identity from persisted credentials.
pub struct StoredCredentialRestoration {
    store: Arc<dyn CredentialStorePort>,
}

impl StoredCredentialRestoration {
    pub fn new(store: Arc<dyn CredentialStorePort>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RestorationStrategy for StoredCredentialRestoration {
    fn name(&self) -> &'static str {
        "stored_credentials"
    }

    async fn restore(&self) -> Result<Option<RestoredSession>, ReadinessError> {
        let credentials = self
            .store
            .load_credentials()
            .await
            .map_err(|e| ReadinessError::StorageRead(format!("{e:#}")))?;

        let Some(credentials) = credentials else {
            debug!("no stored credentials");
            return Ok(None);
        };

        info!(
            identity_id = %credentials.identity_id,
            kind = %credentials.identity_kind,
            "stored credentials found"
        );

        Ok(Some(RestoredSession {
            identity: Identity::restored(credentials.identity_id, credentials.identity_kind),
            access_token: credentials.access_token,
            origin: RestorationOrigin::Stored,
        }))
    }
}
