//! Project Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateProject, DeleteProject, UpdateProject};
use crate::application::error::ApplicationError;
use crate::application::ports::{ProjectApiPort, ProjectDraft, ProjectStorePort};
use crate::domain::project::{NovelProject, ProjectId, Title};

// ============================================================================
// CreateProject
// ============================================================================

/// CreateProject Handler
///
/// 后端可达时由后端分配 ID；连通类失败降级为离线创建。
/// 两条路径都把结果镜像进离线缓存
pub struct CreateProjectHandler {
    api: Arc<dyn ProjectApiPort>,
    store: Arc<dyn ProjectStorePort>,
}

impl CreateProjectHandler {
    pub fn new(api: Arc<dyn ProjectApiPort>, store: Arc<dyn ProjectStorePort>) -> Self {
        Self { api, store }
    }

    pub async fn handle(&self, command: CreateProject) -> Result<NovelProject, ApplicationError> {
        let title =
            Title::new(command.title.clone()).map_err(|e| ApplicationError::validation(e))?;

        let draft = ProjectDraft {
            title: command.title.clone(),
            genre: command.genre.clone(),
            premise: command.premise.clone(),
            themes: command.themes.clone(),
            writing_style: command.writing_style,
            target_length: command.target_length,
        };

        let project = match self.api.create_project(draft).await {
            Ok(project) => project,
            Err(err) if err.is_connectivity() => {
                tracing::warn!(error = %err, "Backend unreachable, creating project offline");
                NovelProject::new(
                    ProjectId::offline(),
                    title,
                    command.genre,
                    command.premise,
                    command.themes,
                    command.writing_style,
                    command.target_length,
                )
            }
            Err(err) => return Err(err.into()),
        };

        self.store.upsert(&project)?;

        tracing::info!(
            project_id = %project.id(),
            title = %project.title(),
            offline = project.id().is_offline(),
            "Project created"
        );

        Ok(project)
    }
}

// ============================================================================
// UpdateProject
// ============================================================================

/// UpdateProject Handler - 远程 PATCH 成功后才镜像进缓存
pub struct UpdateProjectHandler {
    api: Arc<dyn ProjectApiPort>,
    store: Arc<dyn ProjectStorePort>,
}

impl UpdateProjectHandler {
    pub fn new(api: Arc<dyn ProjectApiPort>, store: Arc<dyn ProjectStorePort>) -> Self {
        Self { api, store }
    }

    pub async fn handle(&self, command: UpdateProject) -> Result<NovelProject, ApplicationError> {
        let updated = self
            .api
            .update_project(&command.project_id, command.patch)
            .await?;

        self.store.upsert(&updated)?;

        tracing::info!(project_id = %updated.id(), "Project updated");
        Ok(updated)
    }
}

// ============================================================================
// DeleteProject
// ============================================================================

/// DeleteProject Handler
pub struct DeleteProjectHandler {
    api: Arc<dyn ProjectApiPort>,
    store: Arc<dyn ProjectStorePort>,
}

impl DeleteProjectHandler {
    pub fn new(api: Arc<dyn ProjectApiPort>, store: Arc<dyn ProjectStorePort>) -> Self {
        Self { api, store }
    }

    pub async fn handle(&self, command: DeleteProject) -> Result<(), ApplicationError> {
        self.api.delete_project(&command.project_id).await?;
        self.store.remove(&command.project_id)?;

        tracing::info!(project_id = %command.project_id, "Project deleted");
        Ok(())
    }
}
