//! Project API Port - 远程后端项目操作抽象
//!
//! 定义项目 CRUD、写作会话与导出的出站接口，
//! 具体实现在 infrastructure/adapters/backend 层

use async_trait::async_trait;

use super::generation::GenerationError;
use crate::domain::project::{
    NovelProject, ProjectId, ProjectStatus, TargetLength, WritingStyle,
};

/// 新建项目的输入
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub title: String,
    pub genre: String,
    pub premise: String,
    pub themes: Option<String>,
    pub writing_style: WritingStyle,
    pub target_length: TargetLength,
}

/// 项目部分更新（PATCH 语义，None 字段不发送）
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub outline: Option<Vec<String>>,
    pub status: Option<ProjectStatus>,
}

/// 写作会话句柄
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub id: String,
    pub project_id: String,
    pub current_chapter: usize,
    pub is_active: bool,
}

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Docx,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "txt" => Some(ExportFormat::Txt),
            "docx" => Some(ExportFormat::Docx),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }
}

/// 导出结果：不透明内容与建议文件名
#[derive(Debug, Clone)]
pub struct ExportedNovel {
    pub content: String,
    pub filename: String,
}

/// Project API Port
#[async_trait]
pub trait ProjectApiPort: Send + Sync {
    /// 创建项目
    async fn create_project(&self, draft: ProjectDraft) -> Result<NovelProject, GenerationError>;

    /// 列出全部项目
    async fn list_projects(&self) -> Result<Vec<NovelProject>, GenerationError>;

    /// 获取单个项目
    async fn get_project(&self, id: &ProjectId) -> Result<NovelProject, GenerationError>;

    /// 部分更新项目
    async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<NovelProject, GenerationError>;

    /// 删除项目
    async fn delete_project(&self, id: &ProjectId) -> Result<(), GenerationError>;

    /// 开启写作会话
    async fn start_writing_session(
        &self,
        project_id: &ProjectId,
    ) -> Result<SessionHandle, GenerationError>;

    /// 导出小说
    async fn export_novel(
        &self,
        id: &ProjectId,
        format: ExportFormat,
    ) -> Result<ExportedNovel, GenerationError>;
}
