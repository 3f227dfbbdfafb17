//! Generation Port - 生成提供方抽象
//!
//! 远程 Ex3 后端与本地 LLM 两种提供方实现同一接口，
//! 调用方对提供方保持多态，不在调用点做字符串分支

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::project::WritingStyle;

/// 客户端错误分类
///
/// 全部非致命，携带可直接展示的提示；连通类错误
/// （超时/证书/拒绝/网络/无可达后端/本地 LLM 不可用）允许调用方降级
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 健康探测在限定时间内无响应
    #[error("Connection timeout")]
    Timeout,

    /// 单个请求超出限定时间
    #[error("Request timeout")]
    RequestTimeout,

    /// 自签名证书未被信任，需要用户在浏览器中打开该地址手动接受
    #[error("Certificate not trusted: open {url} in a browser and accept the certificate, then retry")]
    CertificateTrust { url: String },

    /// 连接被拒绝，目标进程大概率未启动
    #[error("Connection refused: backend server is likely not running")]
    ConnectionRefused,

    /// 其他传输层错误
    #[error("Network error: {0}")]
    Network(String),

    /// 所有候选地址均探测失败
    #[error("No reachable backend, attempted: {0}")]
    NoReachableBackend(String),

    /// 后端可达但拒绝了请求，状态码原样透传
    #[error("Backend returned HTTP {0}")]
    HttpStatus(u16),

    /// 响应体无法按约定解析
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 本地 LLM 整体不可用，不做细分
    #[error("Local LLM unavailable: {0}. Ensure the server is running")]
    LocalLlmUnavailable(String),
}

impl GenerationError {
    /// 是否为连通类失败（可降级到离线/本地路径）
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            GenerationError::Timeout
                | GenerationError::RequestTimeout
                | GenerationError::CertificateTrust { .. }
                | GenerationError::ConnectionRefused
                | GenerationError::Network(_)
                | GenerationError::NoReachableBackend(_)
                | GenerationError::LocalLlmUnavailable(_)
        )
    }
}

/// 前提生成请求
#[derive(Debug, Clone)]
pub struct PremiseRequest {
    pub genre: String,
    pub themes: Option<String>,
}

/// 生成的标题与前提
#[derive(Debug, Clone)]
pub struct GeneratedPremise {
    pub title: String,
    pub premise: String,
}

/// 大纲生成请求
#[derive(Debug, Clone)]
pub struct OutlineRequest {
    pub premise: String,
    pub genre: String,
}

/// 章节生成请求
///
/// 同时携带远程路径需要的项目 ID 与本地路径需要的提示词素材
#[derive(Debug, Clone)]
pub struct ChapterGenRequest {
    pub project_id: String,
    pub genre: String,
    pub writing_style: WritingStyle,
    pub chapter_index: usize,
    pub chapter_summary: String,
    pub previous_context: Option<String>,
}

/// 生成的章节正文与实体
#[derive(Debug, Clone, Default)]
pub struct GeneratedChapter {
    pub content: String,
    pub characters: Vec<String>,
    pub locations: Vec<String>,
}

/// Generation Port
///
/// 生成提供方的统一抽象接口
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// 生成标题与前提
    async fn generate_premise(
        &self,
        request: PremiseRequest,
    ) -> Result<GeneratedPremise, GenerationError>;

    /// 生成有序章节摘要列表
    async fn generate_outline(
        &self,
        request: OutlineRequest,
    ) -> Result<Vec<String>, GenerationError>;

    /// 生成章节正文
    async fn generate_chapter(
        &self,
        request: ChapterGenRequest,
    ) -> Result<GeneratedChapter, GenerationError>;

    /// 提供方是否可用
    async fn check_health(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_classification() {
        assert!(GenerationError::Timeout.is_connectivity());
        assert!(GenerationError::ConnectionRefused.is_connectivity());
        assert!(GenerationError::CertificateTrust {
            url: "https://localhost:8000".to_string()
        }
        .is_connectivity());
        assert!(!GenerationError::HttpStatus(404).is_connectivity());
        assert!(!GenerationError::InvalidResponse("bad json".to_string()).is_connectivity());
    }
}
