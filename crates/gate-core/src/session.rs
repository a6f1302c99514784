//! Session state held by the identity cache.

use crate::identity::{AccessToken, Identity};
use crate::ids::IdentityId;

/// Monotonic counter advanced by every explicit reset (logout).
///
/// Results of work started under an older epoch must not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionEpoch(pub u64);

impl SessionEpoch {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Point-in-time copy of the identity cache.
///
/// `identity` and `access_token` are always both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub access_token: Option<AccessToken>,
    pub is_loading: bool,
    pub epoch: SessionEpoch,
}

impl SessionSnapshot {
    /// State at cold start: nothing known yet, restoration pending.
    pub fn loading() -> Self {
        Self {
            identity: None,
            access_token: None,
            is_loading: true,
            epoch: SessionEpoch::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(&self.identity, Some(identity) if !identity.is_anonymous())
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(&self.identity, Some(identity) if identity.is_anonymous())
    }

    pub fn has_identity(&self) -> bool {
        self.identity.is_some()
    }

    pub fn identity_id(&self) -> Option<&IdentityId> {
        self.identity.as_ref().map(|identity| &identity.id)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::loading()
    }
}
