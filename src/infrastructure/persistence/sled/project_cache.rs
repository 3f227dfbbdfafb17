//! Sled-based Offline Project Cache Implementation
//!
//! 整个项目列表序列化为一个 JSON 值，存在固定键下——
//! 与后端线格式同形，便于离线读路径直接反序列化

use sled::Db;
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{ProjectStorePort, StoreError};
use crate::domain::project::{NovelProject, ProjectId};

/// 项目列表所在的固定键
const PROJECTS_KEY: &str = "projects";

/// Sled 缓存配置
#[derive(Debug, Clone)]
pub struct SledCacheConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledCacheConfig {
    fn default() -> Self {
        Self {
            db_path: "data/projects.sled".to_string(),
        }
    }
}

/// Sled 离线项目缓存
pub struct SledProjectCache {
    db: Db,
}

impl SledProjectCache {
    /// 创建新的缓存实例
    pub fn new(config: &SledCacheConfig) -> Result<Self, StoreError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        tracing::info!(db_path = %config.db_path, "SledProjectCache initialized");

        Ok(Self { db })
    }

    /// 打开指定路径的缓存
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let config = SledCacheConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        };
        Self::new(&config)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn read_list(&self) -> Result<Vec<NovelProject>, StoreError> {
        let bytes = self
            .db
            .get(PROJECTS_KEY)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        match bytes {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::SerializationError(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    fn write_list(&self, projects: &[NovelProject]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(projects)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;

        self.db
            .insert(PROJECTS_KEY, bytes)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

impl ProjectStorePort for SledProjectCache {
    fn save_all(&self, projects: &[NovelProject]) -> Result<(), StoreError> {
        self.write_list(projects)?;
        tracing::debug!(count = projects.len(), "Offline cache refreshed");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<NovelProject>, StoreError> {
        self.read_list()
    }

    fn upsert(&self, project: &NovelProject) -> Result<(), StoreError> {
        let mut projects = self.read_list()?;
        match projects.iter().position(|p| p.id() == project.id()) {
            Some(pos) => projects[pos] = project.clone(),
            None => projects.push(project.clone()),
        }
        self.write_list(&projects)
    }

    fn remove(&self, id: &ProjectId) -> Result<(), StoreError> {
        let mut projects = self.read_list()?;
        projects.retain(|p| p.id() != id);
        self.write_list(&projects)
    }
}
