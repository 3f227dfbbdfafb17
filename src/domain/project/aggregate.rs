//! Project Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Chapter, ProjectError, ProjectId, ProjectStatus, TargetLength, Title, WritingStyle};

/// NovelProject 聚合根
///
/// 不变量:
/// - chapters[i] 与 outline[i] 按位置一一对应
/// - progress 始终由 已生成章节数 / 大纲长度 重新计算，不作为持久化的真值
/// - 章节顺序按索引递增
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelProject {
    id: ProjectId,
    title: Title,
    genre: String,
    premise: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    themes: Option<String>,
    #[serde(default)]
    writing_style: WritingStyle,
    #[serde(default)]
    target_length: TargetLength,
    #[serde(default)]
    outline: Vec<String>,
    #[serde(default)]
    chapters: Vec<Chapter>,
    #[serde(default)]
    status: ProjectStatus,
    /// 完成百分比（0-100），派生值
    #[serde(default)]
    progress: u8,
    created_at: DateTime<Utc>,
    /// 线格式沿用后端的 modifiedAt 字段名
    #[serde(rename = "modifiedAt")]
    updated_at: DateTime<Utc>,
}

impl NovelProject {
    /// 创建新项目（ID 由调用方提供：后端分配或离线生成）
    pub fn new(
        id: ProjectId,
        title: Title,
        genre: impl Into<String>,
        premise: impl Into<String>,
        themes: Option<String>,
        writing_style: WritingStyle,
        target_length: TargetLength,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            genre: genre.into(),
            premise: premise.into(),
            themes,
            writing_style,
            target_length,
            outline: Vec::new(),
            chapters: Vec::new(),
            status: ProjectStatus::Planning,
            progress: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// 设置大纲（覆盖旧大纲，保留已生成章节）
    pub fn set_outline(&mut self, outline: Vec<String>) {
        self.outline = outline;
        self.recompute_progress();
        self.updated_at = Utc::now();
    }

    /// 写入一个章节
    ///
    /// 同索引章节被替换；章节列表保持按索引有序
    pub fn set_chapter(&mut self, chapter: Chapter) -> Result<(), ProjectError> {
        if self.outline.is_empty() {
            return Err(ProjectError::EmptyOutline);
        }
        if chapter.id() >= self.outline.len() {
            return Err(ProjectError::ChapterIndexOutOfRange {
                index: chapter.id(),
                outline_len: self.outline.len(),
            });
        }

        match self.chapters.iter().position(|c| c.id() == chapter.id()) {
            Some(pos) => self.chapters[pos] = chapter,
            None => {
                self.chapters.push(chapter);
                self.chapters.sort_by_key(|c| c.id());
            }
        }

        if self.status == ProjectStatus::Planning {
            self.status = ProjectStatus::Writing;
        }
        self.recompute_progress();
        if self.progress >= 100 {
            self.status = ProjectStatus::Completed;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// 更新建议性状态
    pub fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn rename(&mut self, title: Title) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    fn recompute_progress(&mut self) {
        self.progress = if self.outline.is_empty() {
            0
        } else {
            let pct = (self.chapters.len() as f64 / self.outline.len() as f64) * 100.0;
            pct.round().min(100.0) as u8
        };
    }

    // Getters
    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn premise(&self) -> &str {
        &self.premise
    }

    pub fn themes(&self) -> Option<&str> {
        self.themes.as_deref()
    }

    pub fn writing_style(&self) -> WritingStyle {
        self.writing_style
    }

    pub fn target_length(&self) -> TargetLength {
        self.target_length
    }

    pub fn outline(&self) -> &[String] {
        &self.outline
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id() == index)
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// 前一章的回顾，作为续写上下文
    pub fn previous_context(&self, chapter_index: usize) -> Option<String> {
        if chapter_index == 0 {
            return None;
        }
        self.chapter(chapter_index - 1)
            .map(|c| c.summary().to_string())
    }

    /// 全部章节正文拼接（分析输入）
    pub fn full_text(&self) -> String {
        self.chapters
            .iter()
            .map(|c| c.content())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::ChapterEntities;

    fn sample_project() -> NovelProject {
        NovelProject::new(
            ProjectId::new("proj_1"),
            Title::new("暗夜之城").unwrap(),
            "fantasy",
            "A city that only exists at night.",
            None,
            WritingStyle::ThirdPerson,
            TargetLength::Medium,
        )
    }

    fn chapter(index: usize) -> Chapter {
        Chapter::new(
            index,
            format!("Chapter {}", index + 1),
            "Some generated prose.".to_string(),
            ChapterEntities::default(),
        )
    }

    #[test]
    fn test_new_project_starts_planning() {
        let project = sample_project();
        assert_eq!(project.status(), ProjectStatus::Planning);
        assert_eq!(project.progress(), 0);
        assert!(project.outline().is_empty());
    }

    #[test]
    fn test_progress_three_of_ten() {
        let mut project = sample_project();
        project.set_outline((0..10).map(|i| format!("Summary {}", i)).collect());

        for i in 0..3 {
            project.set_chapter(chapter(i)).unwrap();
        }

        // 3 / 10 = 30%
        assert_eq!(project.progress(), 30);
        assert_eq!(project.status(), ProjectStatus::Writing);
    }

    #[test]
    fn test_chapter_replaces_same_index() {
        let mut project = sample_project();
        project.set_outline(vec!["a".to_string(), "b".to_string()]);

        project.set_chapter(chapter(0)).unwrap();
        project.set_chapter(chapter(0)).unwrap();

        assert_eq!(project.chapters().len(), 1);
        assert_eq!(project.progress(), 50);
    }

    #[test]
    fn test_chapter_out_of_range_rejected() {
        let mut project = sample_project();
        project.set_outline(vec!["a".to_string()]);

        let err = project.set_chapter(chapter(5)).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::ChapterIndexOutOfRange {
                index: 5,
                outline_len: 1
            }
        ));
    }

    #[test]
    fn test_chapter_without_outline_rejected() {
        let mut project = sample_project();
        assert!(matches!(
            project.set_chapter(chapter(0)),
            Err(ProjectError::EmptyOutline)
        ));
    }

    #[test]
    fn test_chapters_kept_sorted() {
        let mut project = sample_project();
        project.set_outline((0..3).map(|i| format!("s{}", i)).collect());

        project.set_chapter(chapter(2)).unwrap();
        project.set_chapter(chapter(0)).unwrap();

        let ids: Vec<usize> = project.chapters().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_all_chapters_completes_project() {
        let mut project = sample_project();
        project.set_outline(vec!["a".to_string(), "b".to_string()]);
        project.set_chapter(chapter(0)).unwrap();
        project.set_chapter(chapter(1)).unwrap();

        assert_eq!(project.progress(), 100);
        assert_eq!(project.status(), ProjectStatus::Completed);
    }

    #[test]
    fn test_previous_context_uses_prior_summary() {
        let mut project = sample_project();
        project.set_outline(vec!["a".to_string(), "b".to_string()]);
        project.set_chapter(chapter(0)).unwrap();

        assert_eq!(project.previous_context(0), None);
        assert_eq!(
            project.previous_context(1).as_deref(),
            Some("Some generated prose.")
        );
    }

    #[test]
    fn test_camel_case_wire_shape() {
        let project = sample_project();
        let json = serde_json::to_value(&project).unwrap();
        assert!(json.get("writingStyle").is_some());
        assert!(json.get("targetLength").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("modifiedAt").is_some());
    }
}
