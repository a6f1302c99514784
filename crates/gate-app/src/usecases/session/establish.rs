use std::sync::Arc;

use gate_core::ports::{CredentialStorePort, NetworkClientPort, StoredCredentials};
use gate_core::{AccessToken, Identity};
use tracing::{info, info_span, Instrument};

use super::SessionError;
use crate::identity_cache::IdentityCache;

/// Install a freshly authenticated session.
///
/// Persists `{token, id, kind}`, registers the token with the network client,
/// then publishes the identity through the cache.
pub struct EstablishSession {
    store: Arc<dyn CredentialStorePort>,
    network: Arc<dyn NetworkClientPort>,
    session: Arc<IdentityCache>,
}

impl EstablishSession {
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

    pub async fn execute(
        &self,
        identity: Identity,
        access_token: AccessToken,
    ) -> Result<(), SessionError> {
        let span = info_span!(
            "usecase.session.establish",
            identity_id = %identity.id,
            kind = %identity.kind,
        );

        async {
            if access_token.is_empty() {
                return Err(SessionError::EmptyToken);
            }

            let credentials = StoredCredentials {
                access_token: access_token.clone(),
                identity_id: identity.id.clone(),
                identity_kind: identity.kind,
            };
            self.store
                .save_credentials(&credentials)
                .await
                .map_err(SessionError::Persist)?;

            self.network
                .set_credential_cache(&access_token, &identity.id)
                .await
                .map_err(SessionError::Network)?;

            self.session.set_auth(identity, access_token);
            info!("session established");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
