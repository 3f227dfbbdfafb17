//! Backend Wire DTOs
//!
//! 与 Ex3 后端 JSON 契约对齐的传输结构（camelCase 字段）

use serde::{Deserialize, Serialize};

use crate::application::ports::{ProjectDraft, ProjectPatch};
use crate::domain::project::{ProjectStatus, TargetLength, WritingStyle};

/// 创建项目请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    pub genre: String,
    pub premise: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub themes: Option<String>,
    pub writing_style: WritingStyle,
    pub target_length: TargetLength,
}

impl From<ProjectDraft> for CreateProjectRequest {
    fn from(draft: ProjectDraft) -> Self {
        Self {
            title: draft.title,
            genre: draft.genre,
            premise: draft.premise,
            themes: draft.themes,
            writing_style: draft.writing_style,
            target_length: draft.target_length,
        }
    }
}

/// 项目部分更新请求体（PATCH，None 字段不发送）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

impl From<ProjectPatch> for UpdateProjectRequest {
    fn from(patch: ProjectPatch) -> Self {
        Self {
            title: patch.title,
            outline: patch.outline,
            status: patch.status,
        }
    }
}

/// 前提生成请求体
#[derive(Debug, Serialize)]
pub struct PremiseRequestBody {
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub themes: Option<String>,
}

/// 前提生成响应体
#[derive(Debug, Deserialize)]
pub struct PremiseResponseBody {
    pub title: String,
    pub premise: String,
}

/// 大纲生成请求体
#[derive(Debug, Serialize)]
pub struct OutlineRequestBody {
    pub premise: String,
    pub genre: String,
}

/// 章节生成请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRequestBody {
    pub project_id: String,
    pub chapter_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_context: Option<String>,
}

/// 章节生成响应中的实体列表
#[derive(Debug, Default, Deserialize)]
pub struct EntitiesBody {
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

/// 章节生成响应体
#[derive(Debug, Deserialize)]
pub struct ChapterResponseBody {
    pub content: String,
    #[serde(default)]
    pub entities: EntitiesBody,
}

/// 开启写作会话请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub project_id: String,
}

/// 写作会话响应体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponseBody {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub current_chapter: usize,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// 导出响应体
#[derive(Debug, Deserialize)]
pub struct ExportResponseBody {
    pub content: String,
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_skips_unset_fields() {
        let body = UpdateProjectRequest {
            title: None,
            outline: Some(vec!["a".to_string()]),
            status: None,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert!(json.get("title").is_none());
        assert!(json.get("status").is_none());
        assert_eq!(json["outline"][0], "a");
    }

    #[test]
    fn test_create_request_camel_case() {
        let body = CreateProjectRequest {
            title: "t".to_string(),
            genre: "g".to_string(),
            premise: "p".to_string(),
            themes: None,
            writing_style: WritingStyle::FirstPerson,
            target_length: TargetLength::Epic,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["writingStyle"], "first-person");
        assert_eq!(json["targetLength"], "epic");
    }

    #[test]
    fn test_chapter_response_tolerates_missing_entities() {
        let body: ChapterResponseBody =
            serde_json::from_str(r#"{"content": "prose"}"#).unwrap();
        assert_eq!(body.content, "prose");
        assert!(body.entities.characters.is_empty());
    }

    #[test]
    fn test_session_response_defaults() {
        let body: SessionResponseBody =
            serde_json::from_str(r#"{"id": "session_1", "projectId": "proj_1"}"#).unwrap();
        assert_eq!(body.current_chapter, 0);
        assert!(body.is_active);
    }
}
