//! Provider Selection - 生成提供方选择
//!
//! 封闭的提供方变体，经统一的 GenerationPort 分发；
//! 选择器本身无状态，只是配置标签到客户端的纯映射

use std::sync::Arc;

use crate::application::ports::GenerationPort;

/// 生成提供方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// 远程 Ex3 后端
    RemoteBackend,
    /// 本地 OpenAI 兼容 LLM
    LocalLlm,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::RemoteBackend => "remote-backend",
            ProviderKind::LocalLlm => "local-llm",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "remote-backend" => Some(ProviderKind::RemoteBackend),
            "local-llm" => Some(ProviderKind::LocalLlm),
            _ => None,
        }
    }
}

impl Default for ProviderKind {
    fn default() -> Self {
        ProviderKind::RemoteBackend
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 按配置标签选择生成提供方
pub fn select_generation_provider(
    kind: ProviderKind,
    backend: Arc<dyn GenerationPort>,
    local_llm: Arc<dyn GenerationPort>,
) -> Arc<dyn GenerationPort> {
    match kind {
        ProviderKind::RemoteBackend => backend,
        ProviderKind::LocalLlm => local_llm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        ChapterGenRequest, GeneratedChapter, GeneratedPremise, GenerationError, OutlineRequest,
        PremiseRequest,
    };
    use async_trait::async_trait;

    struct TaggedProvider(&'static str);

    #[async_trait]
    impl GenerationPort for TaggedProvider {
        async fn generate_premise(
            &self,
            _request: PremiseRequest,
        ) -> Result<GeneratedPremise, GenerationError> {
            Ok(GeneratedPremise {
                title: self.0.to_string(),
                premise: String::new(),
            })
        }

        async fn generate_outline(
            &self,
            _request: OutlineRequest,
        ) -> Result<Vec<String>, GenerationError> {
            Ok(vec![self.0.to_string()])
        }

        async fn generate_chapter(
            &self,
            _request: ChapterGenRequest,
        ) -> Result<GeneratedChapter, GenerationError> {
            Ok(GeneratedChapter::default())
        }

        async fn check_health(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(
            ProviderKind::from_str("remote-backend"),
            Some(ProviderKind::RemoteBackend)
        );
        assert_eq!(ProviderKind::from_str("local-llm"), Some(ProviderKind::LocalLlm));
        assert_eq!(ProviderKind::from_str("cloud"), None);
    }

    #[tokio::test]
    async fn test_selector_dispatches_to_tagged_client() {
        let backend: Arc<dyn GenerationPort> = Arc::new(TaggedProvider("backend"));
        let local: Arc<dyn GenerationPort> = Arc::new(TaggedProvider("local"));

        let request = OutlineRequest {
            premise: String::new(),
            genre: String::new(),
        };

        let picked =
            select_generation_provider(ProviderKind::LocalLlm, backend.clone(), local.clone());
        assert_eq!(
            picked.generate_outline(request.clone()).await.unwrap(),
            vec!["local"]
        );

        let picked = select_generation_provider(ProviderKind::RemoteBackend, backend, local);
        assert_eq!(
            picked.generate_outline(request).await.unwrap(),
            vec!["backend"]
        );
    }
}
