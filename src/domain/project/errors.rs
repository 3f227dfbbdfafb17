//! Project Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("无效的标题: {0}")]
    InvalidTitle(String),

    #[error("章节索引超出大纲范围: {index} >= {outline_len}")]
    ChapterIndexOutOfRange { index: usize, outline_len: usize },

    #[error("大纲为空，无法生成章节")]
    EmptyOutline,
}
