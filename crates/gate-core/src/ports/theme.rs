use async_trait::async_trait;

use crate::theme::Theme;

#[async_trait]
pub trait ThemePreferencePort: Send + Sync {
    /// Load the persisted preference; a missing preference is `Theme::System`.
    async fn load_theme(&self) -> anyhow::Result<Theme>;

    async fn save_theme(&self, theme: Theme) -> anyhow::Result<()>;
}
