use std::sync::Arc;

use gate_core::ports::{CredentialStorePort, NetworkClientPort};
use tracing::{info, info_span, warn, Instrument};

use super::SessionError;
use crate::identity_cache::IdentityCache;

/// End the current session.
///
/// Clears persisted credentials and the onboarding flag, drops the network
/// client's credential cache, then resets the identity cache. The in-memory
/// reset always happens; the first persistence failure is returned afterwards.
pub struct SignOut {
    store: Arc<dyn CredentialStorePort>,
    network: Arc<dyn NetworkClientPort>,
    session: Arc<IdentityCache>,
}

impl SignOut {
    pub fn new(
        store: Arc<dyn CredentialStorePort>,
        network: Arc<dyn NetworkClientPort>,
        session: Arc<IdentityCache>,
    ) -> Self {
        Self {
            store,
            network,
            session,
        }
    }

    pub async fn execute(&self) -> Result<(), SessionError> {
        let span = info_span!("usecase.session.sign_out");
        async {
            let mut first_error = None;

            if let Err(err) = self.store.clear_credentials().await {
                warn!(error = %err, "failed to clear stored credentials");
                first_error = first_error.or(Some(SessionError::Clear(err)));
            }
            if let Err(err) = self.store.set_onboarding_completed(false).await {
                warn!(error = %err, "failed to clear onboarding flag");
                first_error = first_error.or(Some(SessionError::Clear(err)));
            }
            if let Err(err) = self.network.clear_credential_cache().await {
                warn!(error = %err, "failed to clear network credential cache");
                first_error = first_error.or(Some(SessionError::Network(err)));
            }

            self.session.reset();
            info!(clean = first_error.is_none(), "signed out");

            match first_error {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
        .instrument(span)
        .await
    }
}
