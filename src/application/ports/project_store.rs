//! Project Store Port - 离线项目缓存抽象
//!
//! 后端不可达时的只读降级来源；成功的远程操作将结果镜像写入，
//! 使离线读路径保持温热。具体实现在 infrastructure/persistence 层

use thiserror::Error;

use crate::domain::project::{NovelProject, ProjectId};

/// Store 错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Project Store Port
///
/// 语义对齐单键 JSON 缓存：整个项目列表作为一个值读写
pub trait ProjectStorePort: Send + Sync {
    /// 覆盖写入完整项目列表
    fn save_all(&self, projects: &[NovelProject]) -> Result<(), StoreError>;

    /// 读取完整项目列表（缓存为空时返回空列表）
    fn load_all(&self) -> Result<Vec<NovelProject>, StoreError>;

    /// 插入或替换单个项目
    fn upsert(&self, project: &NovelProject) -> Result<(), StoreError>;

    /// 移除单个项目（不存在时为幂等空操作）
    fn remove(&self, id: &ProjectId) -> Result<(), StoreError>;
}
