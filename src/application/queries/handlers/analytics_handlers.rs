//! Analytics Query Handlers

use crate::application::queries::AnalyzeProject;
use crate::domain::analytics::{compute_stats, WritingStats};

/// AnalyzeProject Handler
///
/// 纯计算，无错误通道：退化输入（无章节）产出全零快照
pub struct AnalyzeProjectHandler;

impl AnalyzeProjectHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, query: AnalyzeProject) -> WritingStats {
        let content = query.project.full_text();
        compute_stats(&content, query.project.target_length())
    }
}

impl Default for AnalyzeProjectHandler {
    fn default() -> Self {
        Self::new()
    }
}
