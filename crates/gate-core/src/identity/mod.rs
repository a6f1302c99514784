//! Identity domain models
//!
//! An [`Identity`] is the principal bound to the current session. Identities
//! restored from the credential store are only partially populated: the
//! capability set and timestamps stay blank until a profile refresh fills
//! them in out-of-band.

mod token;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::IdentityId;

pub use token::AccessToken;

/// Kind of principal.
///
/// 身份类型：匿名 / 完整账号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityKind {
    Anonymous,
    Full,
}

impl IdentityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityKind::Anonymous => "anonymous",
            IdentityKind::Full => "full",
        }
    }
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown identity kind: {0}")]
pub struct UnknownIdentityKind(pub String);

impl FromStr for IdentityKind {
    type Err = UnknownIdentityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "anonymous" => Ok(IdentityKind::Anonymous),
            "full" => Ok(IdentityKind::Full),
            other => Err(UnknownIdentityKind(other.to_string())),
        }
    }
}

/// An authenticated or anonymous principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub kind: IdentityKind,
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_active_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// Fully populated identity, as returned by an authentication round-trip.
    pub fn new(
        id: IdentityId,
        kind: IdentityKind,
        capabilities: BTreeSet<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            capabilities,
            created_at: Some(created_at),
            last_active_at: Some(created_at),
        }
    }

    /// Identity rebuilt from persisted credentials.
    ///
    /// Capabilities and timestamps are left blank pending a profile refresh.
    pub fn restored(id: IdentityId, kind: IdentityKind) -> Self {
        Self {
            id,
            kind,
            capabilities: BTreeSet::new(),
            created_at: None,
            last_active_at: None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.kind == IdentityKind::Anonymous
    }

    /// Whether the profile has been hydrated beyond the restored skeleton.
    pub fn is_hydrated(&self) -> bool {
        self.created_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_kind_parses_known_values() {
        assert_eq!("anonymous".parse::<IdentityKind>(), Ok(IdentityKind::Anonymous));
        assert_eq!(" full ".parse::<IdentityKind>(), Ok(IdentityKind::Full));
    }

    #[test]
    fn test_identity_kind_rejects_unknown_values() {
        let err = "guest".parse::<IdentityKind>().unwrap_err();
        assert_eq!(err, UnknownIdentityKind("guest".to_string()));
    }

    #[test]
    fn test_restored_identity_is_partial() {
        let identity = Identity::restored("u1".into(), IdentityKind::Anonymous);
        assert!(identity.capabilities.is_empty());
        assert!(identity.created_at.is_none());
        assert!(identity.last_active_at.is_none());
        assert!(!identity.is_hydrated());
        assert!(identity.is_anonymous());
    }

    #[test]
    fn test_identity_kind_serde_uses_snake_case() {
        let json = serde_json::to_string(&IdentityKind::Anonymous).unwrap();
        assert_eq!(json, "\"anonymous\"");
    }
}
