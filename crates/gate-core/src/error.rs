//! Error taxonomy for bootstrap and navigation.

use std::time::Duration;

use thiserror::Error;

/// Failures on the readiness path.
///
/// Every variant is recovered by degradation at its call site: logged, then
/// mapped to the conservative default (no credentials, onboarding not
/// completed, client uninitialized-but-functional, default theme).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadinessError {
    #[error("credential store read failed: {0}")]
    StorageRead(String),

    #[error("network client init failed: {0}")]
    NetworkClientInit(String),

    #[error("onboarding flag read failed: {0}")]
    OnboardingRead(String),

    #[error("theme preference load failed: {0}")]
    ThemeLoad(String),

    #[error("credential restoration timed out after {0:?}")]
    RestorationTimeout(Duration),
}

impl ReadinessError {
    /// Stable short name used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ReadinessError::StorageRead(_) => "storage_read",
            ReadinessError::NetworkClientInit(_) => "network_client_init",
            ReadinessError::OnboardingRead(_) => "onboarding_read",
            ReadinessError::ThemeLoad(_) => "theme_load",
            ReadinessError::RestorationTimeout(_) => "restoration_timeout",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("router rejected path {path}: {reason}")]
    Rejected { path: String, reason: String },

    #[error("router unavailable")]
    Unavailable,
}
