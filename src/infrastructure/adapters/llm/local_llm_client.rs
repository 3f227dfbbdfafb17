//! Local LLM Client - 调用本地 OpenAI 兼容服务
//!
//! 单一配置地址，无候选探测。目标是用户自己机器上的进程，
//! 失败不做细分：任何传输或非 2xx 都归为"本地 LLM 不可用"
//!
//! 外部 API:
//! GET  {base}/v1/models           — 健康检查 + 模型列表
//! POST {base}/v1/chat/completions — {model, messages[], max_tokens, temperature, stream:false}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::prompts::{chapter_prompt, outline_prompt, parse_outline, parse_premise, premise_prompt};
use crate::application::ports::{
    ChapterGenRequest, GeneratedChapter, GeneratedPremise, GenerationError, GenerationPort,
    OutlineRequest, PremiseRequest,
};

/// 默认本地 LLM 地址（Ollama 的 OpenAI 兼容端点）
pub const DEFAULT_LOCAL_LLM_URL: &str = "http://localhost:11434";

/// 本地 LLM 客户端配置
#[derive(Debug, Clone)]
pub struct LocalLlmClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// 模型名
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 章节生成的默认 token 上限
    pub max_tokens: u32,
    /// 章节生成的默认采样温度
    pub temperature: f32,
}

impl Default for LocalLlmClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LOCAL_LLM_URL.to_string(),
            model: "llama3".to_string(),
            timeout_secs: 120,
            max_tokens: 2048,
            temperature: 0.8,
        }
    }
}

impl LocalLlmClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// 本地 LLM 客户端
pub struct LocalLlmClient {
    client: Client,
    config: LocalLlmClientConfig,
}

impl LocalLlmClient {
    /// 创建新的本地 LLM 客户端
    pub fn new(config: LocalLlmClientConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::LocalLlmUnavailable(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 使用默认配置创建客户端
    pub fn with_default_config() -> Result<Self, GenerationError> {
        Self::new(LocalLlmClientConfig::default())
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    fn models_url(&self) -> String {
        format!("{}/v1/models", self.config.base_url)
    }

    fn unavailable(detail: impl Into<String>) -> GenerationError {
        GenerationError::LocalLlmUnavailable(detail.into())
    }

    /// 列出服务端可用模型
    pub async fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        let response = self
            .client
            .get(self.models_url())
            .send()
            .await
            .map_err(|e| Self::unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::unavailable(format!("HTTP {}", response.status())));
        }

        let models: ModelsResponse = response
            .json()
            .await
            .map_err(|e| Self::unavailable(e.to_string()))?;

        Ok(models.data.into_iter().map(|m| m.id).collect())
    }

    /// 发起一次补全并取第一个 choice 的正文
    pub async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
        system_prompt: Option<&str>,
    ) -> Result<String, GenerationError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens,
            temperature,
            stream: false,
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Local LLM completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::unavailable(format!("HTTP {}", response.status())));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Self::unavailable(e.to_string()))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Self::unavailable("empty choices in completion response"))?;

        tracing::debug!(completion_len = text.len(), "Local LLM completion received");
        Ok(text)
    }

    /// 服务是否可用（GET /v1/models 返回 2xx）
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.models_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl GenerationPort for LocalLlmClient {
    async fn generate_premise(
        &self,
        request: PremiseRequest,
    ) -> Result<GeneratedPremise, GenerationError> {
        let (system, user) = premise_prompt(&request.genre, request.themes.as_deref());
        let text = self.generate(&user, 1024, 0.9, Some(system.as_str())).await?;
        Ok(parse_premise(&text, &request.genre))
    }

    async fn generate_outline(
        &self,
        request: OutlineRequest,
    ) -> Result<Vec<String>, GenerationError> {
        let (system, user) = outline_prompt(&request.premise, &request.genre);
        let text = self.generate(&user, 2048, 0.8, Some(system.as_str())).await?;
        Ok(parse_outline(&text))
    }

    async fn generate_chapter(
        &self,
        request: ChapterGenRequest,
    ) -> Result<GeneratedChapter, GenerationError> {
        let (system, user) = chapter_prompt(
            &request.genre,
            request.writing_style,
            &request.chapter_summary,
            request.previous_context.as_deref(),
        );
        let content = self
            .generate(
                &user,
                self.config.max_tokens,
                self.config.temperature,
                Some(system.as_str()),
            )
            .await?;

        // 本地路径不产出实体，由上层用启发式提取器回填
        Ok(GeneratedChapter {
            content,
            characters: Vec::new(),
            locations: Vec::new(),
        })
    }

    async fn check_health(&self) -> bool {
        self.health_check().await
    }
}
