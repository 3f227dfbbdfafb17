//! Export Command Handler

use std::sync::Arc;

use crate::application::commands::ExportNovel;
use crate::application::error::ApplicationError;
use crate::application::ports::{ExportFormat, ExportedNovel, ProjectApiPort};
use crate::domain::project::NovelProject;

/// ExportNovel Handler
///
/// 远程路径由后端渲染导出内容；后端不可达或提供方为本地 LLM 时
/// 在客户端拼装同样形状的导出文本
pub struct ExportNovelHandler {
    api: Option<Arc<dyn ProjectApiPort>>,
}

impl ExportNovelHandler {
    pub fn new(api: Option<Arc<dyn ProjectApiPort>>) -> Self {
        Self { api }
    }

    pub async fn handle(&self, command: ExportNovel) -> Result<ExportedNovel, ApplicationError> {
        let ExportNovel { project, format } = command;

        if let Some(api) = &self.api {
            match api.export_novel(project.id(), format).await {
                Ok(exported) => {
                    tracing::info!(
                        project_id = %project.id(),
                        filename = %exported.filename,
                        "Novel exported via backend"
                    );
                    return Ok(exported);
                }
                Err(err) if err.is_connectivity() => {
                    tracing::warn!(error = %err, "Backend unreachable, building export locally");
                }
                Err(err) => return Err(err.into()),
            }
        }

        let exported = build_export(&project, format);
        tracing::info!(
            project_id = %project.id(),
            filename = %exported.filename,
            "Novel exported locally"
        );
        Ok(exported)
    }
}

/// 本地拼装导出内容（与后端导出同形）
fn build_export(project: &NovelProject, format: ExportFormat) -> ExportedNovel {
    let mut content = format!(
        "Title: {}\nGenre: {}\nPremise: {}\n\n",
        project.title(),
        project.genre(),
        project.premise()
    );

    for chapter in project.chapters() {
        content.push_str(&format!(
            "Chapter {}: {}\n{}\n\n",
            chapter.id() + 1,
            chapter.title(),
            chapter.content()
        ));
    }

    ExportedNovel {
        filename: format!("{}.{}", project.title(), format.as_str()),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::{
        Chapter, ChapterEntities, ProjectId, TargetLength, Title, WritingStyle,
    };

    fn project_with_chapter() -> NovelProject {
        let mut project = NovelProject::new(
            ProjectId::new("proj_1"),
            Title::new("Nightfall").unwrap(),
            "fantasy",
            "A premise.",
            None,
            WritingStyle::ThirdPerson,
            TargetLength::Short,
        );
        project.set_outline(vec!["Opening - it begins".to_string()]);
        project
            .set_chapter(Chapter::new(
                0,
                "Opening".to_string(),
                "It was dark.".to_string(),
                ChapterEntities::default(),
            ))
            .unwrap();
        project
    }

    #[test]
    fn test_local_export_shape() {
        let exported = build_export(&project_with_chapter(), ExportFormat::Txt);

        assert_eq!(exported.filename, "Nightfall.txt");
        assert!(exported.content.starts_with("Title: Nightfall\nGenre: fantasy\n"));
        assert!(exported.content.contains("Chapter 1: Opening\nIt was dark."));
    }

    #[tokio::test]
    async fn test_handler_without_api_builds_locally() {
        let handler = ExportNovelHandler::new(None);
        let exported = handler
            .handle(ExportNovel {
                project: project_with_chapter(),
                format: ExportFormat::Pdf,
            })
            .await
            .unwrap();

        assert_eq!(exported.filename, "Nightfall.pdf");
    }
}
