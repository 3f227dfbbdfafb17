//! exnovel - AI 小说写作客户端核心
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Project Context: 小说项目管理上下文
//! - Analytics Context: 文本启发式分析上下文
//!
//! 应用层 (application/):
//! - Ports: 端口定义（GenerationPort, ProjectApiPort, ProjectStorePort,
//!   EntityExtractorPort, SessionManagerPort）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - Connectivity: 候选地址探测、失败分类、地址解析与缓存
//! - Adapters: 远程后端客户端、本地 LLM 客户端、提示词、实体提取、提供方选择
//! - Memory: 写作会话内存管理
//! - Persistence: Sled 离线项目缓存

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
