use std::sync::Arc;

use gate_core::ports::CredentialStorePort;
use tracing::{debug, warn};

/// Whether the gender reminder should still be shown.
pub struct GenderReminderStatus {
    store: Arc<dyn CredentialStorePort>,
}

impl GenderReminderStatus {
    pub fn new(store: Arc<dyn CredentialStorePort>) -> Self {
        Self { store }
    }

    /// Returns `true` when the reminder was dismissed. A failed read counts
    /// as not dismissed.
    pub async fn execute(&self) -> bool {
        match self.store.is_gender_reminder_dismissed().await {
            Ok(dismissed) => dismissed,
            Err(err) => {
                warn!(error = %err, "failed to read gender reminder flag");
                false
            }
        }
    }
}

/// Record that the user dismissed the gender reminder.
pub struct DismissGenderReminder {
    store: Arc<dyn CredentialStorePort>,
}

impl DismissGenderReminder {
    pub fn new(store: Arc<dyn CredentialStorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        self.store.set_gender_reminder_dismissed(true).await?;
        debug!("gender reminder dismissed");
        Ok(())
    }
}
