//! Fake Generation Client - 用于测试的生成提供方
//!
//! 始终返回配置的固定内容，不发起任何网络调用

use async_trait::async_trait;

use crate::application::ports::{
    ChapterGenRequest, GeneratedChapter, GeneratedPremise, GenerationError, GenerationPort,
    OutlineRequest, PremiseRequest,
};

/// Fake Generation Client 配置
#[derive(Debug, Clone)]
pub struct FakeGenerationClientConfig {
    /// 固定返回的标题
    pub premise_title: String,
    /// 固定返回的前提
    pub premise_text: String,
    /// 固定返回的大纲
    pub outline: Vec<String>,
    /// 固定返回的章节正文
    pub chapter_content: String,
    /// 固定返回的角色列表
    pub characters: Vec<String>,
    /// 固定返回的地点列表
    pub locations: Vec<String>,
    /// 健康检查结果
    pub healthy: bool,
}

impl Default for FakeGenerationClientConfig {
    fn default() -> Self {
        Self {
            premise_title: "The Hollow Lantern".to_string(),
            premise_text: "A lamplighter discovers the city lights are keeping something asleep."
                .to_string(),
            outline: (1..=10)
                .map(|i| format!("Chapter {} - things escalate", i))
                .collect(),
            chapter_content: "Wren crossed the square at dusk. \"Stay close,\" she said. \
                              The castle gate stood open behind the fog."
                .to_string(),
            characters: vec!["Wren".to_string()],
            locations: vec!["castle".to_string()],
            healthy: true,
        }
    }
}

/// Fake Generation Client
pub struct FakeGenerationClient {
    config: FakeGenerationClientConfig,
}

impl FakeGenerationClient {
    pub fn new(config: FakeGenerationClientConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeGenerationClientConfig::default())
    }

    /// 不携带实体的变体（驱动上层的启发式回填路径）
    pub fn without_entities() -> Self {
        let config = FakeGenerationClientConfig {
            characters: Vec::new(),
            locations: Vec::new(),
            ..Default::default()
        };
        Self::new(config)
    }
}

#[async_trait]
impl GenerationPort for FakeGenerationClient {
    async fn generate_premise(
        &self,
        _request: PremiseRequest,
    ) -> Result<GeneratedPremise, GenerationError> {
        Ok(GeneratedPremise {
            title: self.config.premise_title.clone(),
            premise: self.config.premise_text.clone(),
        })
    }

    async fn generate_outline(
        &self,
        _request: OutlineRequest,
    ) -> Result<Vec<String>, GenerationError> {
        Ok(self.config.outline.clone())
    }

    async fn generate_chapter(
        &self,
        request: ChapterGenRequest,
    ) -> Result<GeneratedChapter, GenerationError> {
        tracing::debug!(
            chapter_index = request.chapter_index,
            "FakeGenerationClient: returning fixed chapter"
        );
        Ok(GeneratedChapter {
            content: self.config.chapter_content.clone(),
            characters: self.config.characters.clone(),
            locations: self.config.locations.clone(),
        })
    }

    async fn check_health(&self) -> bool {
        self.config.healthy
    }
}
