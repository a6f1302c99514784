//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML file and maps it to the `AppConfig` DTO. No validation and
//! no defaults here; empty values are facts and the wiring layer decides
//! what they mean.
//!
//! 仅纯数据加载，接受文件中的任何内容。

use std::path::PathBuf;

use anyhow::Context;
use gate_core::config::AppConfig;

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV: &str = "BOOTGATE_CONFIG";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Load `config_path` if given, falling back to the empty config.
///
/// The load error is handed back instead of logged, since tracing is not
/// initialised until the config is known.
pub fn load_config_or_default(
    config_path: Option<PathBuf>,
) -> (AppConfig, Option<anyhow::Error>) {
    match config_path {
        None => (AppConfig::empty(), None),
        Some(path) => match load_config(path) {
            Ok(config) => (config, None),
            Err(err) => (AppConfig::empty(), Some(err)),
        },
    }
}
