//! Health Probe - 可达性探测
//!
//! 对候选地址发起 GET /health，限时等待，只看 2xx。
//! 以 trait 作为接缝，解析器测试中注入假探针

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::candidates::is_https;
use super::error::{looks_like_certificate_error, looks_like_refused, ConnectError};

/// 默认健康探测超时（秒）
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 3;

/// Health Probe 接口
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// 探测一个候选地址，健康返回 Ok(())，否则返回分类后的错误
    async fn probe(&self, base_url: &str) -> Result<(), ConnectError>;
}

/// 基于 reqwest 的健康探测
pub struct HttpHealthProbe {
    client: Client,
    timeout: Duration,
}

impl HttpHealthProbe {
    pub fn new(timeout_secs: u64) -> Result<Self, ConnectError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ConnectError::Network {
                url: String::new(),
                detail: e.to_string(),
            })?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    fn health_url(base_url: &str) -> String {
        format!("{}/health", base_url)
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn probe(&self, base_url: &str) -> Result<(), ConnectError> {
        let url = Self::health_url(base_url);
        tracing::debug!(url = %url, "Probing backend health");

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| classify_transport_error(base_url, &e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ConnectError::HttpStatus {
                url: base_url.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

/// 把 reqwest 传输错误归类
///
/// 优先级: 超时 → 证书子串 → 拒绝/不可达 →
/// （HTTPS 候选上的不可辨识失败按约定归为证书）→ 泛网络错误
pub fn classify_transport_error(base_url: &str, err: &reqwest::Error) -> ConnectError {
    if err.is_timeout() {
        return ConnectError::Timeout {
            url: base_url.to_string(),
        };
    }

    let detail = error_chain_text(err);

    if looks_like_certificate_error(&detail) {
        return ConnectError::CertificateTrust {
            url: base_url.to_string(),
        };
    }

    if looks_like_refused(&detail) {
        return ConnectError::Refused {
            url: base_url.to_string(),
        };
    }

    if is_https(base_url) {
        // 浏览器对自签名证书拒绝返回的就是这类不可辨识的传输失败
        return ConnectError::CertificateTrust {
            url: base_url.to_string(),
        };
    }

    ConnectError::Network {
        url: base_url.to_string(),
        detail,
    }
}

/// 拼接错误链全文（reqwest 顶层信息常常不含根因）
fn error_chain_text(err: &reqwest::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}
