//! ID type wrappers for type safety.

mod id_macro;
pub mod identity_id;

pub use identity_id::IdentityId;
