//! File-based credential store
//!
//! Persists the session credentials together with the onboarding and
//! reminder flags as one JSON document in the application data directory.

use std::path::PathBuf;

use async_trait::async_trait;
use gate_core::ports::{CredentialStorePort, StoredCredentials};
use gate_core::{AccessToken, IdentityId, IdentityKind};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

use super::json_file::JsonFile;

pub const DEFAULT_CREDENTIALS_FILE: &str = "session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identity_kind: Option<String>,
    #[serde(default)]
    onboarding_completed: bool,
    #[serde(default)]
    gender_reminder_dismissed: bool,
}

pub struct FileCredentialStore {
    file: JsonFile,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: JsonFile::new(path),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_CREDENTIALS_FILE))
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    async fn read(&self) -> anyhow::Result<SessionDocument> {
        self.file.load().await
    }

    /// Read-modify-write under the write lock.
    ///
    /// An unparseable document is replaced rather than blocking every later
    /// write; reads keep reporting it until then.
    async fn update(&self, apply: impl FnOnce(&mut SessionDocument)) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document: SessionDocument = match self.file.load().await {
            Ok(document) => document,
            Err(err) if err.downcast_ref::<serde_json::Error>().is_some() => {
                warn!(
                    path = %self.file.path().display(),
                    error = %format!("{err:#}"),
                    "overwriting corrupt session document"
                );
                SessionDocument::default()
            }
            Err(err) => return Err(err),
        };
        apply(&mut document);
        self.file.store(&document).await
    }
}

#[async_trait]
impl CredentialStorePort for FileCredentialStore {
    async fn get_access_token(&self) -> anyhow::Result<Option<AccessToken>> {
        Ok(self.read().await?.access_token.map(AccessToken::new))
    }

    async fn get_identity_id(&self) -> anyhow::Result<Option<IdentityId>> {
        Ok(self
            .read()
            .await?
            .identity_id
            .filter(|id| !id.trim().is_empty())
            .map(IdentityId::from))
    }

    async fn get_identity_kind(&self) -> anyhow::Result<Option<IdentityKind>> {
        let Some(raw) = self.read().await?.identity_kind else {
            return Ok(None);
        };
        match raw.parse::<IdentityKind>() {
            Ok(kind) => Ok(Some(kind)),
            Err(err) => {
                warn!(error = %err, "ignoring unknown persisted identity kind");
                Ok(None)
            }
        }
    }

    async fn save_credentials(&self, credentials: &StoredCredentials) -> anyhow::Result<()> {
        self.update(|document| {
            document.access_token = Some(credentials.access_token.expose().to_string());
            document.identity_id = Some(credentials.identity_id.as_str().to_string());
            document.identity_kind = Some(credentials.identity_kind.as_str().to_string());
        })
        .await
    }

    async fn clear_credentials(&self) -> anyhow::Result<()> {
        self.update(|document| {
            document.access_token = None;
            document.identity_id = None;
            document.identity_kind = None;
        })
        .await
    }

    async fn is_onboarding_completed(&self) -> anyhow::Result<bool> {
        Ok(self.read().await?.onboarding_completed)
    }

    async fn set_onboarding_completed(&self, completed: bool) -> anyhow::Result<()> {
        self.update(|document| document.onboarding_completed = completed)
            .await
    }

    async fn is_gender_reminder_dismissed(&self) -> anyhow::Result<bool> {
        Ok(self.read().await?.gender_reminder_dismissed)
    }

    async fn set_gender_reminder_dismissed(&self, dismissed: bool) -> anyhow::Result<()> {
        self.update(|document| document.gender_reminder_dismissed = dismissed)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn credentials(id: &str, kind: IdentityKind) -> StoredCredentials {
        StoredCredentials {
            access_token: AccessToken::new("token-1"),
            identity_id: IdentityId::from(id),
            identity_kind: kind,
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::with_defaults(temp_dir.path().to_path_buf());

        assert!(store.load_credentials().await.unwrap().is_none());
        assert!(!store.is_onboarding_completed().await.unwrap());
        assert!(!store.is_gender_reminder_dismissed().await.unwrap());
    }

    #[tokio::test]
    async fn test_save_and_load_credentials() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::with_defaults(temp_dir.path().join("nested"));

        store
            .save_credentials(&credentials("u1", IdentityKind::Anonymous))
            .await
            .unwrap();

        let loaded = store.load_credentials().await.unwrap().unwrap();
        assert_eq!(loaded, credentials("u1", IdentityKind::Anonymous));
        assert!(!temp_dir.path().join("nested/session.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_clear_credentials_keeps_flags() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::with_defaults(temp_dir.path().to_path_buf());
        store
            .save_credentials(&credentials("u1", IdentityKind::Full))
            .await
            .unwrap();
        store.set_onboarding_completed(true).await.unwrap();
        store.set_gender_reminder_dismissed(true).await.unwrap();

        store.clear_credentials().await.unwrap();

        assert!(store.load_credentials().await.unwrap().is_none());
        assert!(store.is_onboarding_completed().await.unwrap());
        assert!(store.is_gender_reminder_dismissed().await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_identity_kind_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        tokio::fs::write(
            &path,
            r#"{"access_token":"t","identity_id":"u1","identity_kind":"guest"}"#,
        )
        .await
        .unwrap();
        let store = FileCredentialStore::new(path);

        assert_eq!(store.get_identity_kind().await.unwrap(), None);
        assert!(store.load_credentials().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        tokio::fs::write(&path, "{not json").await.unwrap();
        let store = FileCredentialStore::new(path);

        assert!(store.load_credentials().await.is_err());
        assert!(store.is_onboarding_completed().await.is_err());
    }

    #[tokio::test]
    async fn test_write_repairs_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        tokio::fs::write(&path, "{not json").await.unwrap();
        let store = FileCredentialStore::new(path);

        store
            .save_credentials(&credentials("u2", IdentityKind::Full))
            .await
            .unwrap();

        let loaded = store.load_credentials().await.unwrap().unwrap();
        assert_eq!(loaded, credentials("u2", IdentityKind::Full));
        assert!(!store.is_onboarding_completed().await.unwrap());
    }

    #[tokio::test]
    async fn test_sign_out_writes_repair_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        tokio::fs::write(&path, "{not json").await.unwrap();
        let store = FileCredentialStore::new(path);

        store.clear_credentials().await.unwrap();
        store.set_onboarding_completed(false).await.unwrap();

        assert!(store.load_credentials().await.unwrap().is_none());
        assert!(!store.is_onboarding_completed().await.unwrap());
    }
}
