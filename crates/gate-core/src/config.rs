//! # Pure Data Module / 纯数据模块
//!
//! Configuration DTO and its TOML mapping. No validation and no default
//! value calculation happen here: missing keys become empty values, and the
//! host decides what an empty value means.
//!
//! 此模块只包含数据结构定义与 TOML 映射，禁止验证逻辑和默认值计算。

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Data directory for persisted credentials and preferences
    /// (may be empty - the host resolves the platform default)
    pub data_dir: PathBuf,

    /// Upper bound for a single credential-store read, in milliseconds
    /// (0 means "not configured")
    pub read_timeout_ms: u64,

    /// Whether logs are also written to a file under the data directory
    pub log_to_file: bool,

    /// Fixed-identity restoration bypass, honoured only by debug builds
    pub debug_restoration: DebugRestorationConfig,
}

/// Debug restoration section
/// 调试用的会话恢复旁路配置
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DebugRestorationConfig {
    pub enabled: bool,
    pub identity_id: String,
    pub access_token: String,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// Empty strings and zeroes are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let section = |name: &str, key: &str| toml_value.get(name).and_then(|s| s.get(key));
        let as_string = |name: &str, key: &str| {
            section(name, key)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Ok(Self {
            data_dir: PathBuf::from(as_string("storage", "data_dir")),
            read_timeout_ms: section("storage", "read_timeout_ms")
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(0),
            log_to_file: section("logging", "file")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            debug_restoration: DebugRestorationConfig {
                enabled: section("debug", "restoration")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false),
                identity_id: as_string("debug", "identity_id"),
                access_token: as_string("debug", "access_token"),
            },
        })
    }

    /// Create empty AppConfig (all empty/default values)
    /// 创建空的 AppConfig（所有字段为空/默认值）
    pub fn empty() -> Self {
        Self {
            data_dir: PathBuf::new(),
            read_timeout_ms: 0,
            log_to_file: false,
            debug_restoration: DebugRestorationConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::empty()
    }
}
