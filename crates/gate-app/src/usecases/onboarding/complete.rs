use std::sync::Arc;

use gate_core::ports::CredentialStorePort;
use tracing::info;

use crate::usecases::navigation::OnboardingSignal;

/// Use case for completing onboarding.
///
/// Marks onboarding as complete in the credential store and tells the
/// navigation gate to re-read the flag for the current identity.
pub struct CompleteOnboarding {
    store: Arc<dyn CredentialStorePort>,
    signal: Arc<OnboardingSignal>,
}

impl CompleteOnboarding {
    pub fn new(store: Arc<dyn CredentialStorePort>, signal: Arc<OnboardingSignal>) -> Self {
        Self { store, signal }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        self.store.set_onboarding_completed(true).await?;
        self.signal.notify_changed();
        info!("onboarding completed");
        Ok(())
    }
}
