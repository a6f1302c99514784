use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use gate_core::ports::{IdentityIssuerPort, IssuedIdentity};
use gate_core::{AccessToken, Identity, IdentityId, IdentityKind};
use uuid::Uuid;

/// Issues anonymous identities locally, without an auth service.
///
/// Used by the headless host; a networked build swaps in a remote issuer.
#[derive(Debug, Default)]
pub struct LocalIdentityIssuer;

impl LocalIdentityIssuer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IdentityIssuerPort for LocalIdentityIssuer {
    async fn issue_anonymous(&self) -> anyhow::Result<IssuedIdentity> {
        let identity = Identity::new(
            IdentityId::generate(),
            IdentityKind::Anonymous,
            BTreeSet::new(),
            Utc::now(),
        );
        let access_token = AccessToken::new(format!("local.{}", Uuid::new_v4().simple()));
        Ok(IssuedIdentity {
            identity,
            access_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issued_identities_are_fresh_and_anonymous() {
        let issuer = LocalIdentityIssuer::new();
        let first = issuer.issue_anonymous().await.unwrap();
        let second = issuer.issue_anonymous().await.unwrap();

        assert!(first.identity.is_anonymous());
        assert!(first.identity.is_hydrated());
        assert!(!first.access_token.is_empty());
        assert_ne!(first.identity.id, second.identity.id);
        assert_ne!(first.access_token, second.access_token);
    }
}
