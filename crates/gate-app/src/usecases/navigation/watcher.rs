//! Navigation gate watcher.

use std::sync::Arc;
use std::time::Duration;

use gate_core::ports::{CredentialStorePort, RouterPort};
use gate_core::{
    GateInputs, GateOutcome, GateState, GateStateMachine, IdentityId, OnboardingCheck,
    ReadinessError, Route, SessionEpoch, SessionSnapshot,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

use super::signal::OnboardingSignal;
use crate::identity_cache::IdentityCache;

/// Upper bound on reconcile passes in [`NavigationGateWatcher::settle`].
const SETTLE_LIMIT: usize = 8;

/// Identity context an onboarding read belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OnboardingKey {
    epoch: SessionEpoch,
    identity_id: IdentityId,
    generation: u64,
}

/// Result of one reconcile pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateEvaluation {
    pub inputs: GateInputs,
    pub outcome: GateOutcome,
    /// Redirect issued by this pass, if any.
    pub redirected_to: Option<Route>,
}

/// Helper for constructing the watcher with explicit dependency fields.
pub struct NavigationGateWatcherDeps {
    pub session: Arc<IdentityCache>,
    pub store: Arc<dyn CredentialStorePort>,
    pub router: Arc<dyn RouterPort>,
    pub onboarding_signal: Arc<OnboardingSignal>,
    pub read_timeout: Duration,
}

/// Re-evaluates the gate whenever the session, the router location or the
/// onboarding flag changes. Read-only with respect to the identity cache.
pub struct NavigationGateWatcher {
    session: Arc<IdentityCache>,
    store: Arc<dyn CredentialStorePort>,
    router: Arc<dyn RouterPort>,
    onboarding_signal: Arc<OnboardingSignal>,
    read_timeout: Duration,

    onboarding: OnboardingCheck,
    checked_for: Option<OnboardingKey>,
    last_applied: Option<GateInputs>,
    last_outcome: Option<GateOutcome>,
}

impl NavigationGateWatcher {
    pub fn from_deps(deps: NavigationGateWatcherDeps) -> Self {
        let NavigationGateWatcherDeps {
            session,
            store,
            router,
            onboarding_signal,
            read_timeout,
        } = deps;

        Self {
            session,
            store,
            router,
            onboarding_signal,
            read_timeout,
            onboarding: OnboardingCheck::Pending,
            checked_for: None,
            last_applied: None,
            last_outcome: None,
        }
    }

    /// State produced by the most recent reconcile pass.
    pub fn state(&self) -> Option<GateState> {
        self.last_outcome.map(|outcome| outcome.state)
    }

    /// Evaluate the gate once against the current inputs.
    ///
    /// Repeating a pass with unchanged inputs issues no further navigation.
    pub async fn reconcile(&mut self) -> GateEvaluation {
        let span = info_span!("usecase.navigation_gate.reconcile");
        async {
            let session = self.sync_onboarding().await;
            let inputs = GateInputs {
                is_loading: session.is_loading,
                identity_present: session.has_identity(),
                onboarding: self.onboarding,
                route_group: self.router.current_group(),
            };
            let outcome = GateStateMachine::decide(&inputs);
            self.last_outcome = Some(outcome);

            if self.last_applied == Some(inputs) {
                return GateEvaluation {
                    inputs,
                    outcome,
                    redirected_to: None,
                };
            }

            let redirected_to = match outcome.decision.target() {
                Some(target) => self.redirect(target, &inputs).await,
                None => {
                    debug!(state = ?outcome.state, decision = ?outcome.decision, "gate evaluated");
                    self.last_applied = Some(inputs);
                    None
                }
            };

            GateEvaluation {
                inputs,
                outcome,
                redirected_to,
            }
        }
        .instrument(span)
        .await
    }

    /// Reconcile until a pass issues no redirect.
    pub async fn settle(&mut self) -> GateEvaluation {
        let mut evaluation = self.reconcile().await;
        for _ in 1..SETTLE_LIMIT {
            if evaluation.redirected_to.is_none() {
                return evaluation;
            }
            evaluation = self.reconcile().await;
        }
        warn!(limit = SETTLE_LIMIT, "navigation gate did not settle");
        evaluation
    }

    /// Watch every input until `shutdown` fires.
    pub async fn run(mut self, shutdown: CancellationToken) {
        let mut session_rx = self.session.subscribe();
        let mut route_rx = self.router.subscribe();
        let mut onboarding_rx = self.onboarding_signal.subscribe();
        info!("navigation gate watcher started");

        loop {
            let _ = session_rx.borrow_and_update();
            let _ = route_rx.borrow_and_update();
            let _ = onboarding_rx.borrow_and_update();

            self.reconcile().await;

            tokio::select! {
                _ = shutdown.cancelled() => break,
                changed = session_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = route_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = onboarding_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!("navigation gate watcher stopped");
    }

    async fn redirect(&mut self, target: Route, inputs: &GateInputs) -> Option<Route> {
        match self.router.replace(target.path()).await {
            Ok(()) => {
                info!(
                    to = %target,
                    from_group = ?inputs.route_group,
                    identity_present = inputs.identity_present,
                    "gate redirect"
                );
                self.last_applied = Some(*inputs);
                Some(target)
            }
            Err(err) => {
                // Leave `last_applied` untouched so the next pass retries.
                warn!(to = %target, error = %err, "gate redirect failed");
                None
            }
        }
    }

    /// Bring the cached onboarding flag in line with the current identity and
    /// return the session snapshot it is consistent with.
    async fn sync_onboarding(&mut self) -> SessionSnapshot {
        loop {
            let session = self.session.snapshot();

            let Some(identity_id) = session.identity_id().cloned() else {
                if self.checked_for.take().is_some() {
                    debug!("identity cleared, onboarding check invalidated");
                }
                self.onboarding = OnboardingCheck::NotRequired;
                return session;
            };

            let key = OnboardingKey {
                epoch: session.epoch,
                identity_id,
                generation: self.onboarding_signal.generation(),
            };
            if self.checked_for.as_ref() == Some(&key) {
                return session;
            }

            self.onboarding = OnboardingCheck::Pending;
            self.checked_for = None;

            let completed = self.read_onboarding_flag(&key.identity_id).await;

            let current = self.session.snapshot();
            let still_relevant = current.epoch == key.epoch
                && current.identity_id() == Some(&key.identity_id)
                && self.onboarding_signal.generation() == key.generation;
            if still_relevant {
                self.onboarding = OnboardingCheck::Checked { completed };
                self.checked_for = Some(key);
            } else {
                debug!(identity_id = %key.identity_id, "discarding onboarding read for stale identity");
            }
        }
    }

    /// Read the onboarding flag, degrading to "not completed" on failure.
    async fn read_onboarding_flag(&self, identity_id: &IdentityId) -> bool {
        let read = tokio::time::timeout(self.read_timeout, self.store.is_onboarding_completed());
        let result = match read.await {
            Ok(Ok(completed)) => Ok(completed),
            Ok(Err(err)) => Err(ReadinessError::OnboardingRead(format!("{err:#}"))),
            Err(_) => Err(ReadinessError::OnboardingRead(format!(
                "timed out after {:?}",
                self.read_timeout
            ))),
        };

        match result {
            Ok(completed) => {
                debug!(identity_id = %identity_id, completed, "onboarding flag read");
                completed
            }
            Err(err) => {
                warn!(
                    identity_id = %identity_id,
                    kind = err.kind(),
                    error = %err,
                    "treating onboarding as not completed"
                );
                false
            }
        }
    }
}
