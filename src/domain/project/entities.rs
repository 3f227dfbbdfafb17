//! Project Context - Entities

use serde::{Deserialize, Serialize};

/// 章节摘要最大长度（字符数），超出部分在句末边界截断
const SUMMARY_MAX_CHARS: usize = 300;

/// 章节中提取到的实体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntities {
    pub characters: Vec<String>,
    pub locations: Vec<String>,
}

impl ChapterEntities {
    pub fn new(characters: Vec<String>, locations: Vec<String>) -> Self {
        Self {
            characters,
            locations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.locations.is_empty()
    }
}

/// 章节 - 一次生成的完整正文
///
/// 不变量:
/// - id 为章节在大纲中的位置索引
/// - summary 为正文的简短回顾，作为后续章节的上下文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// 位置索引（与大纲条目一一对应）
    id: usize,
    /// 章节标题
    title: String,
    /// 生成的完整正文
    content: String,
    /// 简短回顾（续写上下文）
    summary: String,
    /// 提取到的角色/地点
    entities: ChapterEntities,
}

impl Chapter {
    pub fn new(id: usize, title: String, content: String, entities: ChapterEntities) -> Self {
        let summary = summarize(&content);
        Self {
            id,
            title,
            content,
            summary,
            entities,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn entities(&self) -> &ChapterEntities {
        &self.entities
    }
}

/// 从正文派生简短回顾
///
/// 取开头至多 SUMMARY_MAX_CHARS 个字符，在最后一个句末标点处截断；
/// 没有句末标点时按字符数硬截断
fn summarize(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.chars().count() <= SUMMARY_MAX_CHARS {
        return trimmed.to_string();
    }

    let head: String = trimmed.chars().take(SUMMARY_MAX_CHARS).collect();
    let cut = head
        .char_indices()
        .filter(|(_, c)| matches!(c, '.' | '!' | '?' | '。' | '！' | '？'))
        .map(|(i, c)| i + c.len_utf8())
        .last();

    match cut {
        Some(end) => head[..end].to_string(),
        None => head,
    }
}
