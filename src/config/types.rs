//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::infrastructure::adapters::ProviderKind;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 生成提供方标签: "remote-backend" | "local-llm"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// 远程后端配置
    #[serde(default)]
    pub backend: BackendConfig,

    /// 本地 LLM 配置
    #[serde(default)]
    pub local_llm: LocalLlmConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            backend: BackendConfig::default(),
            local_llm: LocalLlmConfig::default(),
            storage: StorageConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// 解析后的提供方标签（校验已保证可解析）
    pub fn provider_kind(&self) -> ProviderKind {
        ProviderKind::from_str(&self.provider).unwrap_or_default()
    }
}

fn default_provider() -> String {
    "remote-backend".to_string()
}

/// 远程后端配置
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// 候选地址端口
    #[serde(default = "default_backend_port")]
    pub port: u16,

    /// 显式基础地址；设置后取代候选列表
    #[serde(default)]
    pub base_url: Option<String>,

    /// 单个请求超时（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// 健康探测超时（秒）
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

fn default_backend_port() -> u16 {
    8000
}

fn default_request_timeout() -> u64 {
    10
}

fn default_probe_timeout() -> u64 {
    3
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            port: default_backend_port(),
            base_url: None,
            request_timeout_secs: default_request_timeout(),
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

/// 本地 LLM 配置
#[derive(Debug, Clone, Deserialize)]
pub struct LocalLlmConfig {
    /// 服务基础 URL
    #[serde(default = "default_llm_url")]
    pub url: String,

    /// 模型名
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    /// 章节生成 token 上限
    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: u32,

    /// 章节生成采样温度
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,
}

fn default_llm_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_llm_model() -> String {
    "llama3".to_string()
}

fn default_llm_timeout() -> u64 {
    120
}

fn default_llm_max_tokens() -> u32 {
    2048
}

fn default_llm_temperature() -> f32 {
    0.8
}

impl Default for LocalLlmConfig {
    fn default() -> Self {
        Self {
            url: default_llm_url(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout(),
            max_tokens: default_llm_max_tokens(),
            temperature: default_llm_temperature(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 离线项目缓存路径
    #[serde(default = "default_cache_path")]
    pub cache_path: String,
}

fn default_cache_path() -> String {
    "data/projects.sled".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cache_path: default_cache_path(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "remote-backend");
        assert_eq!(config.backend.port, 8000);
        assert_eq!(config.backend.request_timeout_secs, 10);
        assert_eq!(config.local_llm.url, "http://localhost:11434");
        assert_eq!(config.storage.cache_path, "data/projects.sled");
    }

    #[test]
    fn test_provider_kind_parsing() {
        let mut config = AppConfig::default();
        assert_eq!(config.provider_kind(), ProviderKind::RemoteBackend);

        config.provider = "local-llm".to_string();
        assert_eq!(config.provider_kind(), ProviderKind::LocalLlm);
    }
}
