//! Session Manager Port - 写作会话生命周期管理
//!
//! 定义写作会话的抽象接口，具体实现在 infrastructure/memory 层

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Session Manager 错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    AlreadyExists(String),

    #[error("Session closed: {0}")]
    Closed(String),
}

/// 写作会话状态（in-memory）
#[derive(Debug, Clone)]
pub struct WritingSession {
    pub id: String,
    pub project_id: String,
    pub current_chapter: usize,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl WritingSession {
    /// 创建本地会话（离线或本地提供方路径）
    pub fn new(project_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            current_chapter: 0,
            is_active: true,
            created_at: now,
            last_activity: now,
        }
    }

    /// 以后端分配的句柄 ID 创建会话镜像
    pub fn with_id(id: impl Into<String>, project_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            project_id: project_id.into(),
            current_chapter: 0,
            is_active: true,
            created_at: now,
            last_activity: now,
        }
    }
}

/// Session Manager Port
///
/// 管理写作会话的生命周期，所有状态存储在内存中
pub trait SessionManagerPort: Send + Sync {
    /// 创建新会话
    fn create(&self, session: WritingSession) -> Result<String, SessionError>;

    /// 获取会话
    fn get(&self, id: &str) -> Result<WritingSession, SessionError>;

    /// 更新当前章节游标
    fn update_chapter(&self, id: &str, chapter_index: usize) -> Result<(), SessionError>;

    /// 检查会话是否有效
    fn is_valid(&self, id: &str) -> bool;

    /// 关闭会话
    fn close(&self, id: &str) -> Result<(), SessionError>;

    /// 获取所有会话 ID
    fn list_all(&self) -> Vec<String>;
}
