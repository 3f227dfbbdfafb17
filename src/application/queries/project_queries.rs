//! Project Queries

use crate::domain::project::ProjectId;

/// 获取项目详情查询
#[derive(Debug, Clone)]
pub struct GetProject {
    pub project_id: ProjectId,
}

/// 列出所有项目查询
///
/// 后端不可达时降级读取离线缓存，不向调用方抛错
#[derive(Debug, Clone)]
pub struct ListProjects;
