//! Platform data directory resolution.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::credential_store::DEFAULT_CREDENTIALS_FILE;
use super::theme_repo::DEFAULT_SETTINGS_FILE;

const APP_DIR_NAME: &str = "bootgate";

/// Environment variable that isolates side-by-side installs (`bootgate-<profile>`).
pub const PROFILE_ENV: &str = "BOOTGATE_PROFILE";

fn resolved_app_dir_name() -> String {
    match std::env::var(PROFILE_ENV) {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

/// Files bootgate keeps under its data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub credentials_file: PathBuf,
    pub settings_file: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    pub fn from_data_dir(data_dir: PathBuf) -> Self {
        Self {
            credentials_file: data_dir.join(DEFAULT_CREDENTIALS_FILE),
            settings_file: data_dir.join(DEFAULT_SETTINGS_FILE),
            log_dir: data_dir.join("logs"),
            data_dir,
        }
    }

    /// Use `configured` when non-empty, otherwise the platform data-local dir.
    pub fn resolve(configured: &Path) -> anyhow::Result<Self> {
        if !configured.as_os_str().is_empty() {
            return Ok(Self::from_data_dir(configured.to_path_buf()));
        }
        Self::resolve_in(dirs::data_local_dir())
    }

    fn resolve_in(base: Option<PathBuf>) -> anyhow::Result<Self> {
        let base = base.context("platform data-local directory is unavailable")?;
        Ok(Self::from_data_dir(base.join(resolved_app_dir_name())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_dir_wins() {
        let paths = AppPaths::resolve(Path::new("/tmp/bootgate-test")).unwrap();
        assert_eq!(paths.data_dir, PathBuf::from("/tmp/bootgate-test"));
        assert_eq!(
            paths.credentials_file,
            PathBuf::from("/tmp/bootgate-test/session.json")
        );
        assert_eq!(
            paths.settings_file,
            PathBuf::from("/tmp/bootgate-test/settings.json")
        );
        assert_eq!(paths.log_dir, PathBuf::from("/tmp/bootgate-test/logs"));
    }

    #[test]
    fn test_empty_config_falls_back_to_platform_dir() {
        let paths = AppPaths::resolve_in(Some(PathBuf::from("/base"))).unwrap();
        assert!(paths.data_dir.starts_with("/base"));
        assert!(paths
            .data_dir
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(APP_DIR_NAME)));
    }

    #[test]
    fn test_missing_platform_dir_is_an_error() {
        assert!(AppPaths::resolve_in(None).is_err());
    }
}
