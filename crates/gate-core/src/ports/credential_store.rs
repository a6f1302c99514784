//! Credential store port
//!
//! Durable key-value persistence for the session credentials, the
//! per-installation onboarding flag and minor UI dismissal flags. Every call
//! may fail; callers on the readiness path treat failure as "value absent".

use async_trait::async_trait;

use crate::identity::{AccessToken, IdentityKind};
use crate::ids::IdentityId;

/// Credentials persisted for session restoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub access_token: AccessToken,
    pub identity_id: IdentityId,
    pub identity_kind: IdentityKind,
}

#[async_trait]
pub trait CredentialStorePort: Send + Sync {
    async fn get_access_token(&self) -> anyhow::Result<Option<AccessToken>>;

    async fn get_identity_id(&self) -> anyhow::Result<Option<IdentityId>>;

    /// Unknown persisted kinds are reported as absent.
    async fn get_identity_kind(&self) -> anyhow::Result<Option<IdentityKind>>;

    /// Persist all three credential fields. Overwrites any previous session.
    async fn save_credentials(&self, credentials: &StoredCredentials) -> anyhow::Result<()>;

    /// Remove the credential fields. Other flags are left untouched.
    async fn clear_credentials(&self) -> anyhow::Result<()>;

    async fn is_onboarding_completed(&self) -> anyhow::Result<bool>;

    async fn set_onboarding_completed(&self, completed: bool) -> anyhow::Result<()>;

    async fn is_gender_reminder_dismissed(&self) -> anyhow::Result<bool>;

    async fn set_gender_reminder_dismissed(&self, dismissed: bool) -> anyhow::Result<()>;

    /// Read the three credential fields; `None` unless all are present.
    async fn load_credentials(&self) -> anyhow::Result<Option<StoredCredentials>> {
        let access_token = self.get_access_token().await?;
        let identity_id = self.get_identity_id().await?;
        let identity_kind = self.get_identity_kind().await?;

        Ok(match (access_token, identity_id, identity_kind) {
            (Some(access_token), Some(identity_id), Some(identity_kind))
                if !access_token.is_empty() =>
            {
                Some(StoredCredentials {
                    access_token,
                    identity_id,
                    identity_kind,
                })
            }
            (access_token, identity_id, identity_kind) => {
                #[cfg(feature = "tracing")]
                {
                    if access_token.is_some() || identity_id.is_some() || identity_kind.is_some() {
                        tracing::warn!(
                            has_token = access_token.is_some(),
                            has_identity_id = identity_id.is_some(),
                            has_kind = identity_kind.is_some(),
                            "ignoring incomplete stored credentials"
                        );
                    }
                }
                #[cfg(not(feature = "tracing"))]
                let _ = (access_token, identity_id, identity_kind);
                None
            }
        })
    }
}

#[cfg(test)]
mockall::mock! {
    pub CredentialStore {}

    #[async_trait]
    impl CredentialStorePort for CredentialStore {
        async fn get_access_token(&self) -> anyhow::Result<Option<AccessToken>>;
        async fn get_identity_id(&self) -> anyhow::Result<Option<IdentityId>>;
        async fn get_identity_kind(&self) -> anyhow::Result<Option<IdentityKind>>;
        async fn save_credentials(&self, credentials: &StoredCredentials) -> anyhow::Result<()>;
        async fn clear_credentials(&self) -> anyhow::Result<()>;
        async fn is_onboarding_completed(&self) -> anyhow::Result<bool>;
        async fn set_onboarding_completed(&self, completed: bool) -> anyhow::Result<()>;
        async fn is_gender_reminder_dismissed(&self) -> anyhow::Result<bool>;
        async fn set_gender_reminder_dismissed(&self, dismissed: bool) -> anyhow::Result<()>;
    }
}
