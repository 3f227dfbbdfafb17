//! Entity Extractor Port - 实体提取抽象
//!
//! 当前实现为大写词序列启发式（句首词会产生误报）；
//! 隔离在接口之后，便于将来替换为真正的 NER 而不影响调用方

/// 提取到的实体列表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedEntities {
    pub characters: Vec<String>,
    pub locations: Vec<String>,
}

impl ExtractedEntities {
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.locations.is_empty()
    }
}

/// Entity Extractor Port
pub trait EntityExtractorPort: Send + Sync {
    /// 从正文提取角色/地点提及
    fn extract(&self, content: &str) -> ExtractedEntities;
}
