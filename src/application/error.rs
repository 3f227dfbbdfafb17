//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{GenerationError, SessionError, StoreError};
use crate::domain::project::ProjectError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 外部服务错误（后端/本地 LLM）
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 会话错误
    #[error("Session error: {0}")]
    SessionError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<GenerationError> for ApplicationError {
    fn from(err: GenerationError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<StoreError> for ApplicationError {
    fn from(err: StoreError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<SessionError> for ApplicationError {
    fn from(err: SessionError) -> Self {
        Self::SessionError(err.to_string())
    }
}

impl From<ProjectError> for ApplicationError {
    fn from(err: ProjectError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
