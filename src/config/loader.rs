//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::infrastructure::adapters::ProviderKind;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `EXNOVEL_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `EXNOVEL_PROVIDER=local-llm`
/// - `EXNOVEL_BACKEND__PORT=8000`
/// - `EXNOVEL_BACKEND__BASE_URL=https://writer-host:8000`
/// - `EXNOVEL_LOCAL_LLM__URL=http://llm-server:11434`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("provider", "remote-backend")?
        .set_default("backend.port", 8000)?
        .set_default("backend.request_timeout_secs", 10)?
        .set_default("backend.probe_timeout_secs", 3)?
        .set_default("local_llm.url", "http://localhost:11434")?
        .set_default("local_llm.model", "llama3")?
        .set_default("local_llm.timeout_secs", 120)?
        .set_default("local_llm.max_tokens", 2048)?
        .set_default("local_llm.temperature", 0.8)?
        .set_default("storage.cache_path", "data/projects.sled")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: EXNOVEL_
    // 层级分隔符: __ (双下划线)
    // 例如: EXNOVEL_BACKEND__PORT=8000
    builder = builder.add_source(
        Environment::with_prefix("EXNOVEL")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证提供方标签
    if ProviderKind::from_str(&config.provider).is_none() {
        return Err(ConfigError::ValidationError(format!(
            "Unknown provider: {} (expected remote-backend | local-llm)",
            config.provider
        )));
    }

    // 验证端口范围
    if config.backend.port == 0 {
        return Err(ConfigError::ValidationError(
            "Backend port cannot be 0".to_string(),
        ));
    }

    // 验证超时
    if config.backend.request_timeout_secs == 0 || config.backend.probe_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Backend timeouts cannot be 0".to_string(),
        ));
    }

    // 验证本地 LLM URL
    if config.local_llm.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Local LLM URL cannot be empty".to_string(),
        ));
    }

    // 验证缓存路径
    if config.storage.cache_path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Cache path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Provider: {}", config.provider);
    tracing::info!("Backend Port: {}", config.backend.port);
    if let Some(base_url) = &config.backend.base_url {
        tracing::info!("Backend Base URL (override): {}", base_url);
    }
    tracing::info!("Backend Request Timeout: {}s", config.backend.request_timeout_secs);
    tracing::info!("Backend Probe Timeout: {}s", config.backend.probe_timeout_secs);
    tracing::info!("Local LLM URL: {}", config.local_llm.url);
    tracing::info!("Local LLM Model: {}", config.local_llm.model);
    tracing::info!("Cache Path: {}", config.storage.cache_path);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.backend.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_unknown_provider() {
        let mut config = AppConfig::default();
        config.provider = "cloud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_llm_url() {
        let mut config = AppConfig::default();
        config.local_llm.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_cache_path() {
        let mut config = AppConfig::default();
        config.storage.cache_path = String::new();
        assert!(validate_config(&config).is_err());
    }
}
