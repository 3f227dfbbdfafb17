//! Analytics Context - 文本启发式分析
//!
//! 职责:
//! - 写作统计（计数、可读性、基调、对话占比、节奏、完成度）
//! - 角色/地点提及提取
//!
//! 全部为纯函数，退化输入归零，不抛错

mod extraction;
mod stats;
mod tone;

pub use extraction::{
    extract_character_mentions, extract_location_mentions, EntityMention, LOCATION_KEYWORDS,
    MAX_CHARACTERS,
};
pub use stats::{compute_stats, WritingStats, WORDS_PER_MINUTE};
pub use tone::{analyze_tone, ToneBreakdown};
