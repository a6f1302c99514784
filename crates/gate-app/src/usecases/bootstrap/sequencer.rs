//! Bootstrap sequencer.
//!
//! Brings the process from cold start to a determined session state. Network
//! client warm-up and theme loading run concurrently with credential
//! restoration; the app readiness signal is raised only after restoration
//! has settled, whatever its outcome. Every collaborator call is bounded by
//! the read timeout.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gate_core::ports::{NetworkClientPort, ThemePreferencePort};
use gate_core::{IdentityId, ReadinessError, ReadinessSource, Theme};
use tracing::{debug, info, info_span, warn, Instrument};

use super::restoration::{RestorationOrigin, RestorationStrategy, RestoredSession};
use crate::identity_cache::{IdentityCache, RestorationTicket};
use crate::readiness::DisplayReadiness;

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(5_000);

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("bootstrap already ran for this process")]
    AlreadyStarted,
}

/// How credential restoration ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestorationOutcome {
    /// Stored credentials installed in the identity cache.
    Restored { identity_id: IdentityId },
    /// Debug identity installed in the identity cache.
    Synthesized { identity_id: IdentityId },
    /// Nothing stored; unauthenticated.
    NoSession,
    /// A reset landed while restoration was in flight; its result was dropped.
    Superseded,
    /// Restoration failed and degraded to unauthenticated.
    Degraded,
}

#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub restoration: RestorationOutcome,
    pub theme: Theme,
    pub degradations: Vec<ReadinessError>,
}

/// Helper for constructing the sequencer with explicit dependency fields.
pub struct BootstrapSequencerDeps {
    pub network: Arc<dyn NetworkClientPort>,
    pub theme: Arc<dyn ThemePreferencePort>,
    pub restoration: Arc<dyn RestorationStrategy>,
    pub session: Arc<IdentityCache>,
    pub readiness: Arc<DisplayReadiness>,
    pub read_timeout: Duration,
}

pub struct BootstrapSequencer {
    network: Arc<dyn NetworkClientPort>,
    theme: Arc<dyn ThemePreferencePort>,
    restoration: Arc<dyn RestorationStrategy>,
    session: Arc<IdentityCache>,
    readiness: Arc<DisplayReadiness>,
    read_timeout: Duration,
    started: AtomicBool,
}

impl BootstrapSequencer {
    pub fn from_deps(deps: BootstrapSequencerDeps) -> Self {
        let BootstrapSequencerDeps {
            network,
            theme,
            restoration,
            session,
            readiness,
            read_timeout,
        } = deps;

        Self {
            network,
            theme,
            restoration,
            session,
            readiness,
            read_timeout,
            started: AtomicBool::new(false),
        }
    }

    /// Run the cold-start sequence. Only the first call per instance runs.
    ///
    /// Never fails on I/O: every collaborator failure is logged, recorded in
    /// the report, and degraded to its conservative default.
    pub async fn run(&self) -> Result<BootstrapReport, BootstrapError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(BootstrapError::AlreadyStarted);
        }

        let span = info_span!(
            "usecase.bootstrap.run",
            strategy = self.restoration.name(),
            timeout_ms = self.read_timeout.as_millis() as u64,
        );

        async {
            let ticket = self.session.begin_restoration();

            let (network, (theme, theme_error), (restoration, restoration_error)) = tokio::join!(
                self.init_network_client(),
                self.load_theme(),
                self.restore(ticket),
            );

            let degradations: Vec<ReadinessError> = [network.err(), theme_error, restoration_error]
                .into_iter()
                .flatten()
                .collect();

            self.readiness.mark_ready(ReadinessSource::App);
            info!(
                outcome = ?restoration,
                theme = %theme,
                degraded = degradations.len(),
                "bootstrap complete"
            );

            Ok(BootstrapReport {
                restoration,
                theme,
                degradations,
            })
        }
        .instrument(span)
        .await
    }

    /// Await a collaborator call, turning an elapsed read timeout into an error.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = anyhow::Result<T>>,
    ) -> anyhow::Result<T> {
        tokio::time::timeout(self.read_timeout, call)
            .await
            .unwrap_or_else(|_| Err(anyhow::anyhow!("timed out after {:?}", self.read_timeout)))
    }

    async fn init_network_client(&self) -> Result<(), ReadinessError> {
        match self.bounded(self.network.init_credential_cache()).await {
            Ok(()) => {
                debug!("network client credential cache initialized");
                Ok(())
            }
            Err(err) => {
                let err = ReadinessError::NetworkClientInit(format!("{err:#}"));
                warn!(kind = err.kind(), error = %err, "continuing without cached credentials");
                Err(err)
            }
        }
    }

    async fn load_theme(&self) -> (Theme, Option<ReadinessError>) {
        let result = match self.bounded(self.theme.load_theme()).await {
            Ok(theme) => {
                debug!(%theme, "theme preference loaded");
                (theme, None)
            }
            Err(err) => {
                let err = ReadinessError::ThemeLoad(format!("{err:#}"));
                warn!(kind = err.kind(), error = %err, "falling back to default theme");
                (Theme::default(), Some(err))
            }
        };
        self.readiness.mark_ready(ReadinessSource::Theme);
        result
    }

    async fn restore(
        &self,
        ticket: RestorationTicket,
    ) -> (RestorationOutcome, Option<ReadinessError>) {
        let attempt = tokio::time::timeout(self.read_timeout, self.restoration.restore()).await;
        let result = attempt.unwrap_or(Err(ReadinessError::RestorationTimeout(self.read_timeout)));

        match result {
            Ok(Some(restored)) => self.install(&ticket, restored).await,
            Ok(None) => {
                self.session.settle_restoration(&ticket);
                (RestorationOutcome::NoSession, None)
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "restoration degraded to no session");
                self.session.settle_restoration(&ticket);
                (RestorationOutcome::Degraded, Some(err))
            }
        }
    }

    async fn install(
        &self,
        ticket: &RestorationTicket,
        restored: RestoredSession,
    ) -> (RestorationOutcome, Option<ReadinessError>) {
        let RestoredSession {
            identity,
            access_token,
            origin,
        } = restored;
        let identity_id = identity.id.clone();

        if !self.session.is_current(ticket) {
            info!(identity_id = %identity_id, "restoration superseded before install");
            return (RestorationOutcome::Superseded, None);
        }

        if origin == RestorationOrigin::Stored {
            if let Err(err) = self
                .bounded(self.network.set_credential_cache(&access_token, &identity_id))
                .await
            {
                let err = ReadinessError::NetworkClientInit(format!("{err:#}"));
                warn!(kind = err.kind(), error = %err, "could not register restored session");
                self.session.settle_restoration(ticket);
                return (RestorationOutcome::Degraded, Some(err));
            }
        }

        if !self
            .session
            .apply_restoration(ticket, identity, access_token)
        {
            info!(identity_id = %identity_id, "restoration superseded during install");
            if origin == RestorationOrigin::Stored {
                if let Err(err) = self.bounded(self.network.clear_credential_cache()).await {
                    warn!(error = %err, "failed to clear superseded credentials");
                }
            }
            return (RestorationOutcome::Superseded, None);
        }

        match origin {
            RestorationOrigin::Stored => (RestorationOutcome::Restored { identity_id }, None),
            RestorationOrigin::Synthesized => {
                (RestorationOutcome::Synthesized { identity_id }, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use gate_core::ports::{NetworkClientPort, ThemePreferencePort};
    use gate_core::{AccessToken, Identity, IdentityKind};
    use mockall::predicate::*;

    use super::*;

    mockall::mock! {
        pub NetworkClient {}

        #[async_trait]
        impl NetworkClientPort for NetworkClient {
            async fn init_credential_cache(&self) -> anyhow::Result<()>;
            async fn set_credential_cache(
                &self,
                token: &AccessToken,
                identity_id: &IdentityId,
            ) -> anyhow::Result<()>;
            async fn clear_credential_cache(&self) -> anyhow::Result<()>;
        }
    }

    mockall::mock! {
        pub ThemePreference {}

        #[async_trait]
        impl ThemePreferencePort for ThemePreference {
            async fn load_theme(&self) -> anyhow::Result<Theme>;
            async fn save_theme(&self, theme: Theme) -> anyhow::Result<()>;
        }
    }

    struct FixedRestoration(Result<Option<RestoredSession>, ReadinessError>);

    #[async_trait]
    impl RestorationStrategy for FixedRestoration {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn restore(&self) -> Result<Option<RestoredSession>, ReadinessError> {
            self.0.clone()
        }
    }

    fn stored_session(id: &str) -> RestoredSession {
        RestoredSession {
            identity: Identity::restored(id.into(), IdentityKind::Anonymous),
            access_token: AccessToken::new("token"),
            origin: RestorationOrigin::Stored,
        }
    }

    fn sequencer(
        network: MockNetworkClient,
        theme: MockThemePreference,
        restoration: FixedRestoration,
    ) -> (BootstrapSequencer, Arc<IdentityCache>, Arc<DisplayReadiness>) {
        let session = Arc::new(IdentityCache::new());
        let readiness = Arc::new(DisplayReadiness::new());
        let sequencer = BootstrapSequencer::from_deps(BootstrapSequencerDeps {
            network: Arc::new(network),
            theme: Arc::new(theme),
            restoration: Arc::new(restoration),
            session: session.clone(),
            readiness: readiness.clone(),
            read_timeout: DEFAULT_READ_TIMEOUT,
        });
        (sequencer, session, readiness)
    }

    fn healthy_theme() -> MockThemePreference {
        let mut theme = MockThemePreference::new();
        theme.expect_load_theme().returning(|| Ok(Theme::Dark));
        theme
    }

    #[tokio::test]
    async fn restored_session_is_registered_then_installed() {
        let mut network = MockNetworkClient::new();
        network
            .expect_init_credential_cache()
            .times(1)
            .returning(|| Ok(()));
        network
            .expect_set_credential_cache()
            .with(always(), eq(IdentityId::from("u1")))
            .times(1)
            .returning(|_, _| Ok(()));

        let (sequencer, session, readiness) = sequencer(
            network,
            healthy_theme(),
            FixedRestoration(Ok(Some(stored_session("u1")))),
        );

        let report = sequencer.run().await.unwrap();

        assert_eq!(
            report.restoration,
            RestorationOutcome::Restored {
                identity_id: "u1".into()
            }
        );
        assert_eq!(report.theme, Theme::Dark);
        assert!(report.degradations.is_empty());
        assert!(session.snapshot().is_anonymous());
        assert!(readiness.is_reached(ReadinessSource::App));
        assert!(readiness.is_reached(ReadinessSource::Theme));
    }

    #[tokio::test]
    async fn network_init_failure_is_not_fatal() {
        let mut network = MockNetworkClient::new();
        network
            .expect_init_credential_cache()
            .returning(|| Err(anyhow::anyhow!("offline")));

        let (sequencer, session, _) =
            sequencer(network, healthy_theme(), FixedRestoration(Ok(None)));

        let report = sequencer.run().await.unwrap();

        assert_eq!(report.restoration, RestorationOutcome::NoSession);
        assert!(matches!(
            report.degradations.as_slice(),
            [ReadinessError::NetworkClientInit(_)]
        ));
        assert!(!session.snapshot().is_loading);
    }

    #[tokio::test]
    async fn theme_failure_falls_back_and_still_marks_theme_ready() {
        let mut network = MockNetworkClient::new();
        network.expect_init_credential_cache().returning(|| Ok(()));
        let mut theme = MockThemePreference::new();
        theme
            .expect_load_theme()
            .returning(|| Err(anyhow::anyhow!("corrupt")));

        let (sequencer, _, readiness) = sequencer(network, theme, FixedRestoration(Ok(None)));

        let report = sequencer.run().await.unwrap();

        assert_eq!(report.theme, Theme::System);
        assert!(readiness.is_reached(ReadinessSource::Theme));
    }

    #[tokio::test]
    async fn registration_failure_degrades_to_no_session() {
        let mut network = MockNetworkClient::new();
        network.expect_init_credential_cache().returning(|| Ok(()));
        network
            .expect_set_credential_cache()
            .returning(|_, _| Err(anyhow::anyhow!("cache full")));

        let (sequencer, session, _) = sequencer(
            network,
            healthy_theme(),
            FixedRestoration(Ok(Some(stored_session("u1")))),
        );

        let report = sequencer.run().await.unwrap();

        assert_eq!(report.restoration, RestorationOutcome::Degraded);
        let snapshot = session.snapshot();
        assert!(!snapshot.has_identity());
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn second_run_is_rejected() {
        let mut network = MockNetworkClient::new();
        network
            .expect_init_credential_cache()
            .times(1)
            .returning(|| Ok(()));

        let (sequencer, _, _) = sequencer(network, healthy_theme(), FixedRestoration(Ok(None)));

        sequencer.run().await.unwrap();
        assert!(matches!(
            sequencer.run().await,
            Err(BootstrapError::AlreadyStarted)
        ));
    }
}
