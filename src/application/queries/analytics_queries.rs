//! Analytics Queries

use crate::domain::project::NovelProject;

/// 项目写作统计查询
///
/// 对项目全部章节正文的拼接计算统计快照
#[derive(Debug, Clone)]
pub struct AnalyzeProject {
    pub project: NovelProject,
}
