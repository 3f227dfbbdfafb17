//! HTTP Backend Client - 调用远程 Ex3 后端
//!
//! 实现 ProjectApiPort 与 GenerationPort，经由解析器取得可用
//! 基础地址后发起类型化请求。单个请求失败不使缓存地址失效，
//! 只有解析期的探测失败才触发候选重走

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::dto::{
    ChapterRequestBody, ChapterResponseBody, CreateProjectRequest, ExportResponseBody,
    OutlineRequestBody, PremiseRequestBody, PremiseResponseBody, SessionResponseBody,
    StartSessionRequest, UpdateProjectRequest,
};
use crate::application::ports::{
    ChapterGenRequest, ExportFormat, ExportedNovel, GeneratedChapter, GeneratedPremise,
    GenerationError, GenerationPort, OutlineRequest, PremiseRequest, ProjectApiPort, ProjectDraft,
    ProjectPatch, SessionHandle,
};
use crate::domain::project::{NovelProject, ProjectId};
use crate::infrastructure::connectivity::{
    candidate_base_urls, classify_transport_error, BackendResolver, ConnectError, HealthProbe,
    HttpHealthProbe, DEFAULT_BACKEND_PORT, DEFAULT_PROBE_TIMEOUT_SECS,
};

/// 默认请求超时（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// HTTP Backend 客户端配置
#[derive(Debug, Clone)]
pub struct HttpBackendClientConfig {
    /// 候选地址使用的端口
    pub port: u16,
    /// 显式基础地址；设置后取代整个候选列表
    pub base_url_override: Option<String>,
    /// 单个请求超时（秒）
    pub request_timeout_secs: u64,
    /// 健康探测超时（秒）
    pub probe_timeout_secs: u64,
}

impl Default for HttpBackendClientConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_BACKEND_PORT,
            base_url_override: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
        }
    }
}

impl HttpBackendClientConfig {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// 实际生效的候选地址列表
    pub fn candidates(&self) -> Vec<String> {
        match &self.base_url_override {
            Some(url) => vec![url.clone()],
            None => candidate_base_urls(self.port),
        }
    }
}

/// HTTP Backend 客户端
pub struct HttpBackendClient {
    client: Client,
    resolver: BackendResolver,
}

impl HttpBackendClient {
    /// 创建新的客户端（内部构建探针与解析器）
    pub fn new(config: HttpBackendClientConfig) -> Result<Self, ConnectError> {
        let probe = HttpHealthProbe::new(config.probe_timeout_secs)?;
        Self::with_probe(config, Arc::new(probe))
    }

    /// 以外部探针创建客户端
    pub fn with_probe(
        config: HttpBackendClientConfig,
        probe: Arc<dyn HealthProbe>,
    ) -> Result<Self, ConnectError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ConnectError::Network {
                url: String::new(),
                detail: e.to_string(),
            })?;

        let resolver = BackendResolver::new(config.candidates(), probe);

        Ok(Self { client, resolver })
    }

    pub fn resolver(&self) -> &BackendResolver {
        &self.resolver
    }

    /// 健康检查：能解析出任一可用候选即视为健康
    pub async fn health_check(&self) -> bool {
        self.resolver.resolve().await.is_ok()
    }

    /// 发送一次类型化请求
    ///
    /// 超时上报 RequestTimeout；证书类传输错误统一归一化，
    /// 调用方无需解析原始错误文本；非 2xx 携带状态码上抛
    async fn execute<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ConnectError> {
        let base = self.resolver.resolve().await?;
        let url = format!("{}{}", base, path);

        tracing::debug!(method = %method, url = %url, "Backend request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ConnectError::RequestTimeout { url: url.clone() }
            } else {
                classify_transport_error(&base, &e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn request_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, GenerationError> {
        let response = self.execute(method, path, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GenerationError> {
        self.request_json::<(), T>(Method::GET, path, None).await
    }
}

#[async_trait]
impl ProjectApiPort for HttpBackendClient {
    async fn create_project(&self, draft: ProjectDraft) -> Result<NovelProject, GenerationError> {
        let body = CreateProjectRequest::from(draft);
        self.request_json(Method::POST, "/api/projects", Some(&body))
            .await
    }

    async fn list_projects(&self) -> Result<Vec<NovelProject>, GenerationError> {
        self.get_json("/api/projects").await
    }

    async fn get_project(&self, id: &ProjectId) -> Result<NovelProject, GenerationError> {
        self.get_json(&format!("/api/projects/{}", id)).await
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<NovelProject, GenerationError> {
        let body = UpdateProjectRequest::from(patch);
        self.request_json(Method::PATCH, &format!("/api/projects/{}", id), Some(&body))
            .await
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), GenerationError> {
        self.execute::<()>(Method::DELETE, &format!("/api/projects/{}", id), None)
            .await?;
        Ok(())
    }

    async fn start_writing_session(
        &self,
        project_id: &ProjectId,
    ) -> Result<SessionHandle, GenerationError> {
        let body = StartSessionRequest {
            project_id: project_id.to_string(),
        };
        let session: SessionResponseBody = self
            .request_json(Method::POST, "/api/writing/start", Some(&body))
            .await?;

        Ok(SessionHandle {
            id: session.id,
            project_id: session.project_id,
            current_chapter: session.current_chapter,
            is_active: session.is_active,
        })
    }

    async fn export_novel(
        &self,
        id: &ProjectId,
        format: ExportFormat,
    ) -> Result<ExportedNovel, GenerationError> {
        let exported: ExportResponseBody = self
            .get_json(&format!("/api/export/{}?format={}", id, format.as_str()))
            .await?;

        Ok(ExportedNovel {
            content: exported.content,
            filename: exported.filename,
        })
    }
}

#[async_trait]
impl GenerationPort for HttpBackendClient {
    async fn generate_premise(
        &self,
        request: PremiseRequest,
    ) -> Result<GeneratedPremise, GenerationError> {
        let body = PremiseRequestBody {
            genre: request.genre,
            themes: request.themes,
        };
        let premise: PremiseResponseBody = self
            .request_json(Method::POST, "/api/generate/premise", Some(&body))
            .await?;

        Ok(GeneratedPremise {
            title: premise.title,
            premise: premise.premise,
        })
    }

    async fn generate_outline(
        &self,
        request: OutlineRequest,
    ) -> Result<Vec<String>, GenerationError> {
        let body = OutlineRequestBody {
            premise: request.premise,
            genre: request.genre,
        };
        self.request_json(Method::POST, "/api/generate/outline", Some(&body))
            .await
    }

    async fn generate_chapter(
        &self,
        request: ChapterGenRequest,
    ) -> Result<GeneratedChapter, GenerationError> {
        let body = ChapterRequestBody {
            project_id: request.project_id,
            chapter_index: request.chapter_index,
            previous_context: request.previous_context,
        };
        let chapter: ChapterResponseBody = self
            .request_json(Method::POST, "/api/writing/generate-chapter", Some(&body))
            .await?;

        Ok(GeneratedChapter {
            content: chapter.content,
            characters: chapter.entities.characters,
            locations: chapter.entities.locations,
        })
    }

    async fn check_health(&self) -> bool {
        self.health_check().await
    }
}
