//! Project Commands

use crate::application::ports::ProjectPatch;
use crate::domain::project::{ProjectId, TargetLength, WritingStyle};

/// 创建项目命令
///
/// 后端不可达时降级为离线创建（客户端生成 `local-` ID）
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub genre: String,
    pub premise: String,
    pub themes: Option<String>,
    pub writing_style: WritingStyle,
    pub target_length: TargetLength,
}

/// 部分更新项目命令
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub project_id: ProjectId,
    pub patch: ProjectPatch,
}

/// 删除项目命令
#[derive(Debug, Clone)]
pub struct DeleteProject {
    pub project_id: ProjectId,
}
