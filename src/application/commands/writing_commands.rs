//! Writing Commands - 生成与导出

use crate::application::ports::ExportFormat;
use crate::domain::project::{NovelProject, ProjectId};

/// 生成标题与前提命令
#[derive(Debug, Clone)]
pub struct GeneratePremise {
    pub genre: String,
    pub themes: Option<String>,
}

/// 生成大纲命令
#[derive(Debug, Clone)]
pub struct GenerateOutline {
    pub project: NovelProject,
}

/// 生成章节命令
#[derive(Debug, Clone)]
pub struct GenerateChapter {
    pub project: NovelProject,
    pub chapter_index: usize,
}

/// 开启写作会话命令
#[derive(Debug, Clone)]
pub struct StartWritingSession {
    pub project_id: ProjectId,
}

/// 导出小说命令
#[derive(Debug, Clone)]
pub struct ExportNovel {
    pub project: NovelProject,
    pub format: ExportFormat,
}
