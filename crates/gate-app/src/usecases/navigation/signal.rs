use tokio::sync::watch;
use tracing::debug;

/// Broadcasts "the persisted onboarding flag changed".
///
/// The gate keys its cached flag to the current identity; this signal makes
/// it re-read the flag for the same identity after an explicit write.
pub struct OnboardingSignal {
    generation: watch::Sender<u64>,
}

impl OnboardingSignal {
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self { generation }
    }

    pub fn notify_changed(&self) {
        self.generation.send_modify(|generation| *generation += 1);
        debug!(generation = *self.generation.borrow(), "onboarding flag changed");
    }

    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }
}

impl Default for OnboardingSignal {
    fn default() -> Self {
        Self::new()
    }
}
