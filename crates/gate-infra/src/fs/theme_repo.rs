use std::path::PathBuf;

use async_trait::async_trait;
use gate_core::ports::ThemePreferencePort;
use gate_core::Theme;
use serde::{Deserialize, Serialize};

use super::json_file::JsonFile;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ThemeSettings {
    #[serde(default)]
    theme: Theme,
}

/// Theme preference stored in `settings.json`.
pub struct FileThemeRepository {
    file: JsonFile,
}

impl FileThemeRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_SETTINGS_FILE))
    }
}

#[async_trait]
impl ThemePreferencePort for FileThemeRepository {
    async fn load_theme(&self) -> anyhow::Result<Theme> {
        let settings: ThemeSettings = self.file.load().await?;
        Ok(settings.theme)
    }

    async fn save_theme(&self, theme: Theme) -> anyhow::Result<()> {
        self.file.store(&ThemeSettings { theme }).await
    }
}
