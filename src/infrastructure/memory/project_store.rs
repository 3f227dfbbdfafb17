//! In-Memory Project Store Implementation
//!
//! 无持久化场景（及测试）使用的缓存实现，语义与 sled 版一致

use std::sync::RwLock;

use crate::application::ports::{ProjectStorePort, StoreError};
use crate::domain::project::{NovelProject, ProjectId};

/// 内存项目缓存
#[derive(Default)]
pub struct InMemoryProjectStore {
    projects: RwLock<Vec<NovelProject>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStorePort for InMemoryProjectStore {
    fn save_all(&self, projects: &[NovelProject]) -> Result<(), StoreError> {
        let mut guard = self
            .projects
            .write()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        *guard = projects.to_vec();
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<NovelProject>, StoreError> {
        let guard = self
            .projects
            .read()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        Ok(guard.clone())
    }

    fn upsert(&self, project: &NovelProject) -> Result<(), StoreError> {
        let mut guard = self
            .projects
            .write()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        match guard.iter().position(|p| p.id() == project.id()) {
            Some(pos) => guard[pos] = project.clone(),
            None => guard.push(project.clone()),
        }
        Ok(())
    }

    fn remove(&self, id: &ProjectId) -> Result<(), StoreError> {
        let mut guard = self
            .projects
            .write()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        guard.retain(|p| p.id() != id);
        Ok(())
    }
}
