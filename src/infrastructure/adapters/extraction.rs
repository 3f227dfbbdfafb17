//! Heuristic Entity Extractor - 实体提取适配器
//!
//! 把领域层的启发式提取函数接到 EntityExtractorPort 上

use crate::application::ports::{EntityExtractorPort, ExtractedEntities};
use crate::domain::analytics::{extract_character_mentions, extract_location_mentions};

/// 基于大写词序列/关键词表的启发式提取器
#[derive(Debug, Default)]
pub struct HeuristicEntityExtractor;

impl HeuristicEntityExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl EntityExtractorPort for HeuristicEntityExtractor {
    fn extract(&self, content: &str) -> ExtractedEntities {
        ExtractedEntities {
            characters: extract_character_mentions(content)
                .into_iter()
                .map(|m| m.name)
                .collect(),
            locations: extract_location_mentions(content)
                .into_iter()
                .map(|m| m.name)
                .collect(),
        }
    }
}
