//! File system adapters.

pub mod app_dirs;
pub mod credential_store;
mod json_file;
pub mod theme_repo;

pub use app_dirs::AppPaths;
pub use credential_store::FileCredentialStore;
pub use theme_repo::FileThemeRepository;
