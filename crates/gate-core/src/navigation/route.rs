use std::fmt;

use serde::{Deserialize, Serialize};

/// Redirect targets the gate can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Entry of the unauthenticated welcome/login flow.
    Welcome,
    /// First screen of the onboarding flow.
    Onboarding,
    /// Root of the main application.
    Main,
}

impl Route {
    pub const WELCOME_PATH: &'static str = "/(auth)/welcome";
    pub const ONBOARDING_PATH: &'static str = "/onboarding";
    pub const MAIN_PATH: &'static str = "/(tabs)";

    pub const fn path(&self) -> &'static str {
        match self {
            Route::Welcome => Self::WELCOME_PATH,
            Route::Onboarding => Self::ONBOARDING_PATH,
            Route::Main => Self::MAIN_PATH,
        }
    }

    pub fn group(&self) -> RouteGroup {
        RouteGroup::from_path(self.path())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Top-level segment the router currently occupies.
///
/// The gate itself only distinguishes [`RouteGroup::AuthFlow`] from
/// everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteGroup {
    AuthFlow,
    Onboarding,
    Main,
    Other,
}

impl RouteGroup {
    pub const AUTH_SEGMENT: &'static str = "(auth)";
    pub const ONBOARDING_SEGMENT: &'static str = "onboarding";
    pub const MAIN_SEGMENT: &'static str = "(tabs)";

    /// Classify a router path by its first non-empty segment.
    pub fn from_path(path: &str) -> Self {
        let first = path
            .split(['/', '?', '#'])
            .find(|segment| !segment.is_empty())
            .unwrap_or("");

        match first {
            Self::AUTH_SEGMENT => RouteGroup::AuthFlow,
            Self::ONBOARDING_SEGMENT => RouteGroup::Onboarding,
            Self::MAIN_SEGMENT => RouteGroup::Main,
            _ => RouteGroup::Other,
        }
    }

    pub fn is_auth_flow(&self) -> bool {
        matches!(self, RouteGroup::AuthFlow)
    }
}
