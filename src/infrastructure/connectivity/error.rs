//! 连通性错误分类
//!
//! 把传输层失败归入可供 UI 给出恢复指引的类别。
//! 证书类判定基于错误链文本的子串启发式，HTTPS 候选上的
//! 不可辨识失败按约定偏向归为证书问题

use thiserror::Error;

use crate::application::ports::GenerationError;

/// 错误链文本中指示证书/TLS 问题的子串（小写比较）
const CERT_ERROR_MARKERS: &[&str] = &[
    "certificate",
    "self signed",
    "self-signed",
    "unknown issuer",
    "unknownissuer",
    "cert_",
    "ssl",
    "tls",
    "handshake",
];

/// 连通性错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 健康探测超时
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// 单个请求超时
    #[error("Request timeout: {url}")]
    RequestTimeout { url: String },

    /// 证书未被信任，需要用户手动接受
    #[error("Certificate not trusted for {url}: open it in a browser and accept the certificate")]
    CertificateTrust { url: String },

    /// 连接被拒绝/不可达，目标进程大概率未启动
    #[error("Connection refused at {url}: backend server is likely not running")]
    Refused { url: String },

    /// 其他传输层错误
    #[error("Network error at {url}: {detail}")]
    Network { url: String, detail: String },

    /// 所有候选地址均失败且无更具体的分类
    #[error("No reachable backend, attempted: {}", attempted.join(", "))]
    NoReachableBackend { attempted: Vec<String> },

    /// 后端可达但返回了错误状态码
    #[error("Backend at {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },
}

impl ConnectError {
    /// 是否为比"连接被拒绝"更具体的分类
    ///
    /// 全部候选失败时优先上报具体分类（超时/证书/网络），
    /// 仅在清一色拒绝时退回 NoReachableBackend
    pub fn is_specific(&self) -> bool {
        matches!(
            self,
            ConnectError::Timeout { .. }
                | ConnectError::RequestTimeout { .. }
                | ConnectError::CertificateTrust { .. }
                | ConnectError::Network { .. }
        )
    }
}

impl From<ConnectError> for GenerationError {
    fn from(err: ConnectError) -> Self {
        match err {
            ConnectError::Timeout { .. } => GenerationError::Timeout,
            ConnectError::RequestTimeout { .. } => GenerationError::RequestTimeout,
            ConnectError::CertificateTrust { url } => GenerationError::CertificateTrust { url },
            ConnectError::Refused { .. } => GenerationError::ConnectionRefused,
            ConnectError::Network { detail, .. } => GenerationError::Network(detail),
            ConnectError::NoReachableBackend { attempted } => {
                GenerationError::NoReachableBackend(attempted.join(", "))
            }
            ConnectError::HttpStatus { status, .. } => GenerationError::HttpStatus(status),
        }
    }
}

/// 错误链文本是否指向证书/TLS 问题
pub fn looks_like_certificate_error(detail: &str) -> bool {
    let lower = detail.to_lowercase();
    CERT_ERROR_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// 错误链文本是否指向连接被拒绝/不可达
pub fn looks_like_refused(detail: &str) -> bool {
    let lower = detail.to_lowercase();
    lower.contains("refused") || lower.contains("unreachable")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_markers() {
        assert!(looks_like_certificate_error(
            "invalid peer certificate: UnknownIssuer"
        ));
        assert!(looks_like_certificate_error("SSL routines: wrong version"));
        assert!(looks_like_certificate_error("self signed certificate"));
        assert!(!looks_like_certificate_error("connection reset by peer"));
    }

    #[test]
    fn test_refused_markers() {
        assert!(looks_like_refused("Connection refused (os error 111)"));
        assert!(looks_like_refused("network unreachable"));
        assert!(!looks_like_refused("timed out"));
    }

    #[test]
    fn test_specificity_ranking() {
        let url = "https://localhost:8000".to_string();
        assert!(ConnectError::Timeout { url: url.clone() }.is_specific());
        assert!(ConnectError::CertificateTrust { url: url.clone() }.is_specific());
        assert!(ConnectError::Network {
            url: url.clone(),
            detail: "reset".to_string()
        }
        .is_specific());
        assert!(!ConnectError::Refused { url }.is_specific());
    }

    #[test]
    fn test_port_error_mapping() {
        let err: GenerationError = ConnectError::HttpStatus {
            url: "http://localhost:8000".to_string(),
            status: 503,
        }
        .into();
        assert!(matches!(err, GenerationError::HttpStatus(503)));
    }
}
