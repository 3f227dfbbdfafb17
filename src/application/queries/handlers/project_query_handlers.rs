//! Project Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ProjectApiPort, ProjectStorePort};
use crate::application::queries::{GetProject, ListProjects};
use crate::domain::project::NovelProject;

// ============================================================================
// ListProjects
// ============================================================================

/// ListProjects Handler
///
/// 后端可达时刷新离线缓存；连通类失败降级为缓存读取，
/// 缓存读取失败也不抛错，返回空列表
pub struct ListProjectsHandler {
    api: Arc<dyn ProjectApiPort>,
    store: Arc<dyn ProjectStorePort>,
}

impl ListProjectsHandler {
    pub fn new(api: Arc<dyn ProjectApiPort>, store: Arc<dyn ProjectStorePort>) -> Self {
        Self { api, store }
    }

    pub async fn handle(&self, _query: ListProjects) -> Result<Vec<NovelProject>, ApplicationError> {
        match self.api.list_projects().await {
            Ok(projects) => {
                if let Err(err) = self.store.save_all(&projects) {
                    tracing::warn!(error = %err, "Failed to refresh offline cache");
                }
                tracing::debug!(count = projects.len(), "Projects listed from backend");
                Ok(projects)
            }
            Err(err) if err.is_connectivity() => {
                tracing::warn!(error = %err, "Backend unreachable, reading offline cache");
                let cached = self.store.load_all().unwrap_or_else(|store_err| {
                    tracing::warn!(error = %store_err, "Offline cache unreadable");
                    Vec::new()
                });
                Ok(cached)
            }
            Err(err) => Err(err.into()),
        }
    }
}

// ============================================================================
// GetProject
// ============================================================================

/// GetProject Handler - 远程优先，连通类失败回退缓存
pub struct GetProjectHandler {
    api: Arc<dyn ProjectApiPort>,
    store: Arc<dyn ProjectStorePort>,
}

impl GetProjectHandler {
    pub fn new(api: Arc<dyn ProjectApiPort>, store: Arc<dyn ProjectStorePort>) -> Self {
        Self { api, store }
    }

    pub async fn handle(&self, query: GetProject) -> Result<NovelProject, ApplicationError> {
        match self.api.get_project(&query.project_id).await {
            Ok(project) => {
                if let Err(err) = self.store.upsert(&project) {
                    tracing::warn!(error = %err, "Failed to mirror project into offline cache");
                }
                Ok(project)
            }
            Err(err) if err.is_connectivity() => {
                tracing::warn!(error = %err, "Backend unreachable, reading offline cache");
                self.store
                    .load_all()?
                    .into_iter()
                    .find(|p| p.id() == &query.project_id)
                    .ok_or_else(|| {
                        ApplicationError::not_found("Project", query.project_id.as_str())
                    })
            }
            Err(err) => Err(err.into()),
        }
    }
}
