//! # Dependency wiring / 依赖注入
//!
//! Builds the concrete adapters from `AppConfig`, applies host defaults to
//! empty config values, and hands out use cases over the shared state.

use std::sync::Arc;
use std::time::Duration;

use gate_app::usecases::bootstrap::{
    BootstrapSequencer, BootstrapSequencerDeps, RestorationStrategy, StoredCredentialRestoration,
    DEFAULT_READ_TIMEOUT,
};
use gate_app::usecases::navigation::{
    NavigationGateWatcher, NavigationGateWatcherDeps, OnboardingSignal,
};
use gate_app::usecases::{
    CompleteOnboarding, DismissGenderReminder, EstablishSession, GenderReminderStatus,
    IssueAnonymousSession, SignOut,
};
use gate_app::{DisplayReadiness, IdentityCache};
use gate_core::config::AppConfig;
use gate_core::ports::{CredentialStorePort, IdentityIssuerPort, ThemePreferencePort};
use gate_infra::{
    AppPaths, FileCredentialStore, FileThemeRepository, InMemoryCredentialCache,
    LocalIdentityIssuer,
};
use tracing::{info, warn};

use crate::router::HeadlessRouter;

/// Shared state and adapters for one process.
pub struct GateRuntime {
    pub paths: AppPaths,
    pub read_timeout: Duration,
    pub session: Arc<IdentityCache>,
    pub readiness: Arc<DisplayReadiness>,
    pub onboarding_signal: Arc<OnboardingSignal>,
    pub store: Arc<dyn CredentialStorePort>,
    pub network: Arc<InMemoryCredentialCache>,
    pub theme: Arc<dyn ThemePreferencePort>,
    pub issuer: Arc<dyn IdentityIssuerPort>,
    pub router: Arc<HeadlessRouter>,
    restoration: Arc<dyn RestorationStrategy>,
}

impl GateRuntime {
    pub fn build(config: &AppConfig, paths: AppPaths, initial_route: &str) -> Self {
        let store: Arc<dyn CredentialStorePort> =
            Arc::new(FileCredentialStore::new(paths.credentials_file.clone()));
        let theme: Arc<dyn ThemePreferencePort> =
            Arc::new(FileThemeRepository::new(paths.settings_file.clone()));
        let restoration = select_restoration_strategy(config, store.clone());
        let read_timeout = resolve_read_timeout(config);

        info!(
            data_dir = %paths.data_dir.display(),
            read_timeout_ms = read_timeout.as_millis() as u64,
            strategy = restoration.name(),
            "runtime wired"
        );

        Self {
            paths,
            read_timeout,
            session: Arc::new(IdentityCache::new()),
            readiness: Arc::new(DisplayReadiness::new()),
            onboarding_signal: Arc::new(OnboardingSignal::new()),
            store,
            network: Arc::new(InMemoryCredentialCache::new()),
            theme,
            issuer: Arc::new(LocalIdentityIssuer::new()),
            router: Arc::new(HeadlessRouter::new(initial_route)),
            restoration,
        }
    }

    pub fn bootstrap_sequencer(&self) -> BootstrapSequencer {
        BootstrapSequencer::from_deps(BootstrapSequencerDeps {
            network: self.network.clone(),
            theme: self.theme.clone(),
            restoration: self.restoration.clone(),
            session: self.session.clone(),
            readiness: self.readiness.clone(),
            read_timeout: self.read_timeout,
        })
    }

    pub fn gate_watcher(&self) -> NavigationGateWatcher {
        NavigationGateWatcher::from_deps(NavigationGateWatcherDeps {
            session: self.session.clone(),
            store: self.store.clone(),
            router: self.router.clone(),
            onboarding_signal: self.onboarding_signal.clone(),
            read_timeout: self.read_timeout,
        })
    }

    pub fn establish_session(&self) -> EstablishSession {
        EstablishSession::new(
            self.store.clone(),
            self.network.clone(),
            self.session.clone(),
        )
    }

    pub fn issue_anonymous_session(&self) -> IssueAnonymousSession {
        IssueAnonymousSession::new(self.issuer.clone(), self.establish_session())
    }

    pub fn sign_out(&self) -> SignOut {
        SignOut::new(
            self.store.clone(),
            self.network.clone(),
            self.session.clone(),
        )
    }

    pub fn complete_onboarding(&self) -> CompleteOnboarding {
        CompleteOnboarding::new(self.store.clone(), self.onboarding_signal.clone())
    }

    pub fn dismiss_gender_reminder(&self) -> DismissGenderReminder {
        DismissGenderReminder::new(self.store.clone())
    }

    pub fn gender_reminder_status(&self) -> GenderReminderStatus {
        GenderReminderStatus::new(self.store.clone())
    }
}

/// `0` means "not configured".
pub fn resolve_read_timeout(config: &AppConfig) -> Duration {
    match config.read_timeout_ms {
        0 => DEFAULT_READ_TIMEOUT,
        ms => Duration::from_millis(ms),
    }
}

#[cfg(feature = "debug-restoration")]
fn select_restoration_strategy(
    config: &AppConfig,
    store: Arc<dyn CredentialStorePort>,
) -> Arc<dyn RestorationStrategy> {
    use gate_app::usecases::bootstrap::DebugRestoration;
    use gate_core::{AccessToken, IdentityId};

    let debug = &config.debug_restoration;
    if !debug.enabled {
        return Arc::new(StoredCredentialRestoration::new(store));
    }
    if debug.identity_id.trim().is_empty() || debug.access_token.trim().is_empty() {
        warn!("debug restoration enabled without identity_id/access_token, using stored credentials");
        return Arc::new(StoredCredentialRestoration::new(store));
    }

    Arc::new(DebugRestoration::new(
        IdentityId::new(debug.identity_id.trim()),
        AccessToken::new(debug.access_token.trim()),
        store,
    ))
}

#[cfg(not(feature = "debug-restoration"))]
fn select_restoration_strategy(
    config: &AppConfig,
    store: Arc<dyn CredentialStorePort>,
) -> Arc<dyn RestorationStrategy> {
    if config.debug_restoration.enabled {
        warn!("debug restoration requested but not compiled in, ignoring");
    }
    Arc::new(StoredCredentialRestoration::new(store))
}
