use std::sync::Arc;

use gate_core::ports::IdentityIssuerPort;
use gate_core::IdentityId;
use tracing::info;

use super::{EstablishSession, SessionError};

/// Sign in as a fresh anonymous identity.
pub struct IssueAnonymousSession {
    issuer: Arc<dyn IdentityIssuerPort>,
    establish: EstablishSession,
}

impl IssueAnonymousSession {
    pub fn new(issuer: Arc<dyn IdentityIssuerPort>, establish: EstablishSession) -> Self {
        Self { issuer, establish }
    }

    /// Returns the id of the newly issued identity.
    pub async fn execute(&self) -> Result<IdentityId, SessionError> {
        let issued = self
            .issuer
            .issue_anonymous()
            .await
            .map_err(SessionError::Issue)?;
        let identity_id = issued.identity.id.clone();
        info!(identity_id = %identity_id, "anonymous identity issued");

        self.establish
            .execute(issued.identity, issued.access_token)
            .await?;
        Ok(identity_id)
    }
}
