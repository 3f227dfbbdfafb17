//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Project Context: 小说项目管理
//! - Analytics Context: 文本启发式分析

pub mod analytics;
pub mod project;
