//! Fixed-identity restoration bypass for debug builds.
//!
//! Compiled only with the `debug-restoration` feature.

use std::sync::Arc;

use async_trait::async_trait;
use gate_core::ports::CredentialStorePort;
use gate_core::{AccessToken, Identity, IdentityId, IdentityKind, ReadinessError};
use tracing::{info, warn};

use super::restoration::{RestorationOrigin, RestorationStrategy, RestoredSession};

/// Installs a fixed anonymous identity and forces onboarding to restart.
pub struct DebugRestoration {
    identity_id: IdentityId,
    access_token: AccessToken,
    store: Arc<dyn CredentialStorePort>,
}

impl DebugRestoration {
    pub fn new(
        identity_id: IdentityId,
        access_token: AccessToken,
        store: Arc<dyn CredentialStorePort>,
    ) -> Self {
        Self {
            identity_id,
            access_token,
            store,
        }
    }
}

#[async_trait]
impl RestorationStrategy for DebugRestoration {
    fn name(&self) -> &'static str {
        "debug_fixed_identity"
    }

    async fn restore(&self) -> Result<Option<RestoredSession>, ReadinessError> {
        warn!(identity_id = %self.identity_id, "debug restoration bypass active");

        if let Err(err) = self.store.set_onboarding_completed(false).await {
            warn!(error = %err, "debug restoration could not reset onboarding flag");
        }

        info!(identity_id = %self.identity_id, "synthesized debug session");
        Ok(Some(RestoredSession {
            identity: Identity::restored(self.identity_id.clone(), IdentityKind::Anonymous),
            access_token: self.access_token.clone(),
            origin: RestorationOrigin::Synthesized,
        }))
    }
}
