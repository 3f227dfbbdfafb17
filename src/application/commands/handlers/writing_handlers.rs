//! Writing Command Handlers - 生成路径

use std::sync::Arc;

use crate::application::commands::{
    GenerateChapter, GenerateOutline, GeneratePremise, StartWritingSession,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ChapterGenRequest, EntityExtractorPort, GeneratedPremise, GenerationPort, OutlineRequest,
    PremiseRequest, ProjectApiPort, ProjectStorePort, SessionManagerPort, WritingSession,
};
use crate::domain::project::{Chapter, ChapterEntities, NovelProject, ProjectError};

// ============================================================================
// GeneratePremise
// ============================================================================

/// GeneratePremise Handler
pub struct GeneratePremiseHandler {
    provider: Arc<dyn GenerationPort>,
}

impl GeneratePremiseHandler {
    pub fn new(provider: Arc<dyn GenerationPort>) -> Self {
        Self { provider }
    }

    pub async fn handle(
        &self,
        command: GeneratePremise,
    ) -> Result<GeneratedPremise, ApplicationError> {
        let premise = self
            .provider
            .generate_premise(PremiseRequest {
                genre: command.genre.clone(),
                themes: command.themes,
            })
            .await?;

        tracing::info!(genre = %command.genre, title = %premise.title, "Premise generated");
        Ok(premise)
    }
}

// ============================================================================
// GenerateOutline
// ============================================================================

/// GenerateOutline Handler - 生成大纲并写入项目
pub struct GenerateOutlineHandler {
    provider: Arc<dyn GenerationPort>,
    store: Arc<dyn ProjectStorePort>,
}

impl GenerateOutlineHandler {
    pub fn new(provider: Arc<dyn GenerationPort>, store: Arc<dyn ProjectStorePort>) -> Self {
        Self { provider, store }
    }

    pub async fn handle(&self, command: GenerateOutline) -> Result<NovelProject, ApplicationError> {
        let mut project = command.project;

        let outline = self
            .provider
            .generate_outline(OutlineRequest {
                premise: project.premise().to_string(),
                genre: project.genre().to_string(),
            })
            .await?;

        if outline.is_empty() {
            return Err(ApplicationError::ExternalServiceError(
                "provider returned an empty outline".to_string(),
            ));
        }

        project.set_outline(outline);
        self.store.upsert(&project)?;

        tracing::info!(
            project_id = %project.id(),
            chapters = project.outline().len(),
            "Outline generated"
        );

        Ok(project)
    }
}

// ============================================================================
// GenerateChapter
// ============================================================================

/// GenerateChapter Handler
///
/// 以前一章回顾作为续写上下文；提供方未返回实体时
/// 用启发式提取器回填；写入章节后进度随之重算
pub struct GenerateChapterHandler {
    provider: Arc<dyn GenerationPort>,
    extractor: Arc<dyn EntityExtractorPort>,
    store: Arc<dyn ProjectStorePort>,
}

impl GenerateChapterHandler {
    pub fn new(
        provider: Arc<dyn GenerationPort>,
        extractor: Arc<dyn EntityExtractorPort>,
        store: Arc<dyn ProjectStorePort>,
    ) -> Self {
        Self {
            provider,
            extractor,
            store,
        }
    }

    pub async fn handle(&self, command: GenerateChapter) -> Result<NovelProject, ApplicationError> {
        let mut project = command.project;
        let index = command.chapter_index;

        let chapter_summary = project
            .outline()
            .get(index)
            .cloned()
            .ok_or(ProjectError::ChapterIndexOutOfRange {
                index,
                outline_len: project.outline().len(),
            })?;

        let generated = self
            .provider
            .generate_chapter(ChapterGenRequest {
                project_id: project.id().to_string(),
                genre: project.genre().to_string(),
                writing_style: project.writing_style(),
                chapter_index: index,
                chapter_summary: chapter_summary.clone(),
                previous_context: project.previous_context(index),
            })
            .await?;

        let entities = if generated.characters.is_empty() && generated.locations.is_empty() {
            let extracted = self.extractor.extract(&generated.content);
            ChapterEntities::new(extracted.characters, extracted.locations)
        } else {
            ChapterEntities::new(generated.characters, generated.locations)
        };

        let title = chapter_title(&chapter_summary, index);
        let chapter = Chapter::new(index, title, generated.content, entities);

        project.set_chapter(chapter)?;
        self.store.upsert(&project)?;

        tracing::info!(
            project_id = %project.id(),
            chapter_index = index,
            progress = project.progress(),
            "Chapter generated"
        );

        Ok(project)
    }
}

/// 从大纲条目派生章节标题
///
/// 大纲条目约定为 "标题 - 简述"，取破折号前的部分
fn chapter_title(summary: &str, index: usize) -> String {
    let head = summary.split(" - ").next().unwrap_or("").trim();
    if head.is_empty() {
        format!("Chapter {}", index + 1)
    } else {
        head.to_string()
    }
}

// ============================================================================
// StartWritingSession
// ============================================================================

/// StartWritingSession Handler
///
/// 远程路径镜像后端句柄；连通类失败降级为本地会话
pub struct StartWritingSessionHandler {
    api: Option<Arc<dyn ProjectApiPort>>,
    sessions: Arc<dyn SessionManagerPort>,
}

impl StartWritingSessionHandler {
    pub fn new(api: Option<Arc<dyn ProjectApiPort>>, sessions: Arc<dyn SessionManagerPort>) -> Self {
        Self { api, sessions }
    }

    pub async fn handle(
        &self,
        command: StartWritingSession,
    ) -> Result<WritingSession, ApplicationError> {
        let session = match &self.api {
            Some(api) => match api.start_writing_session(&command.project_id).await {
                Ok(handle) => WritingSession::with_id(handle.id, handle.project_id),
                Err(err) if err.is_connectivity() => {
                    tracing::warn!(error = %err, "Backend unreachable, starting local session");
                    WritingSession::new(command.project_id.as_str())
                }
                Err(err) => return Err(err.into()),
            },
            None => WritingSession::new(command.project_id.as_str()),
        };

        self.sessions.create(session.clone())?;

        tracing::info!(
            session_id = %session.id,
            project_id = %session.project_id,
            "Writing session started"
        );

        Ok(session)
    }
}
