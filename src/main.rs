//! exnovel - 连通性与提供方状态报告
//!
//! 一次性状态工具：加载配置，解析后端、探测本地 LLM、
//! 报告所选提供方健康度与（离线可降级的）项目数量后退出

use std::sync::Arc;

use exnovel::application::ports::{GenerationPort, ProjectApiPort, ProjectStorePort};
use exnovel::application::queries::handlers::ListProjectsHandler;
use exnovel::application::queries::ListProjects;
use exnovel::config::{load_config, print_config};
use exnovel::infrastructure::adapters::{
    select_generation_provider, HttpBackendClient, HttpBackendClientConfig, LocalLlmClient,
    LocalLlmClientConfig,
};
use exnovel::infrastructure::persistence::sled::{SledCacheConfig, SledProjectCache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},exnovel={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("exnovel - AI 小说写作客户端核心");
    print_config(&config);

    // 确保缓存目录存在
    if let Some(parent) = std::path::Path::new(&config.storage.cache_path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 打开离线项目缓存
    let cache_config = SledCacheConfig {
        db_path: config.storage.cache_path.clone(),
    };
    let store = Arc::new(SledProjectCache::new(&cache_config)?);

    // 创建远程后端客户端
    let mut backend_config = HttpBackendClientConfig::new(config.backend.port)
        .with_request_timeout(config.backend.request_timeout_secs);
    backend_config.probe_timeout_secs = config.backend.probe_timeout_secs;
    if let Some(base_url) = &config.backend.base_url {
        backend_config = backend_config.with_base_url(base_url.clone());
    }
    let backend = Arc::new(HttpBackendClient::new(backend_config)?);

    // 创建本地 LLM 客户端
    let llm_config = LocalLlmClientConfig::new(config.local_llm.url.clone())
        .with_model(config.local_llm.model.clone())
        .with_timeout(config.local_llm.timeout_secs);
    let local_llm = Arc::new(LocalLlmClient::new(llm_config)?);

    // 报告后端解析结果（失败时给出分类后的恢复指引）
    match backend.resolver().resolve().await {
        Ok(url) => tracing::info!(url = %url, "Backend reachable"),
        Err(err) => tracing::warn!(error = %err, "Backend unreachable"),
    }

    // 报告本地 LLM 状态与可用模型
    if local_llm.health_check().await {
        match local_llm.list_models().await {
            Ok(models) => {
                tracing::info!(models = ?models, "Local LLM reachable");
            }
            Err(err) => tracing::warn!(error = %err, "Local LLM model listing failed"),
        }
    } else {
        tracing::warn!("Local LLM unreachable");
    }

    // 所选提供方健康度
    let provider_kind = config.provider_kind();
    let provider = select_generation_provider(
        provider_kind,
        backend.clone() as Arc<dyn GenerationPort>,
        local_llm.clone() as Arc<dyn GenerationPort>,
    );
    tracing::info!(
        provider = %provider_kind,
        healthy = provider.check_health().await,
        "Selected generation provider"
    );

    // 项目数量（后端不可达时自动降级读取离线缓存）
    let list_handler = ListProjectsHandler::new(
        backend as Arc<dyn ProjectApiPort>,
        store as Arc<dyn ProjectStorePort>,
    );
    match list_handler.handle(ListProjects).await {
        Ok(projects) => tracing::info!(count = projects.len(), "Projects available"),
        Err(err) => tracing::warn!(error = %err, "Project listing failed"),
    }

    Ok(())
}
