use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Opaque identifier of an authenticated or anonymous principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(String);

impl_id!(IdentityId);
