//! 实体提及启发式提取
//!
//! 角色：匹配一到两个连续首字母大写的词序列（句首词会产生误报，按约定保留）；
//! 地点：固定关键词表，大小写不敏感计数

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// 角色名单上限
pub const MAX_CHARACTERS: usize = 10;

/// 地点关键词表
pub const LOCATION_KEYWORDS: &[&str] = &[
    "castle", "forest", "city", "town", "village", "mountain", "river", "ocean",
];

/// 一次实体提及及其出现次数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMention {
    pub name: String,
    pub count: usize,
}

fn character_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?\b").expect("valid regex"))
}

/// 提取角色提及
///
/// 按首次出现顺序去重，截取前 MAX_CHARACTERS 个名字，
/// 再统计每个名字在全文中的原始出现次数
pub fn extract_character_mentions(content: &str) -> Vec<EntityMention> {
    let mut seen = HashSet::new();
    let mut names: Vec<String> = Vec::new();

    for m in character_regex().find_iter(content) {
        let name = m.as_str().to_string();
        if seen.insert(name.clone()) {
            names.push(name);
            if names.len() >= MAX_CHARACTERS {
                break;
            }
        }
    }

    names
        .into_iter()
        .map(|name| {
            let count = content.matches(name.as_str()).count();
            EntityMention { name, count }
        })
        .collect()
}

/// 提取地点提及
///
/// 仅保留出现次数至少为 1 的关键词
pub fn extract_location_mentions(content: &str) -> Vec<EntityMention> {
    let lower = content.to_lowercase();
    LOCATION_KEYWORDS
        .iter()
        .filter_map(|kw| {
            let count = lower.matches(kw).count();
            if count > 0 {
                Some(EntityMention {
                    name: kw.to_string(),
                    count,
                })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_no_entities() {
        assert!(extract_character_mentions("").is_empty());
        assert!(extract_location_mentions("").is_empty());
    }

    #[test]
    fn test_single_and_double_token_names() {
        let text = "Anna met Johan Berg near the gate. Anna smiled.";
        let mentions = extract_character_mentions(text);
        let names: Vec<&str> = mentions.iter().map(|m| m.name.as_str()).collect();

        assert!(names.contains(&"Anna"));
        assert!(names.contains(&"Johan Berg"));
    }

    #[test]
    fn test_counts_raw_occurrences() {
        let text = "Anna waited. Anna left. Anna returned.";
        let mentions = extract_character_mentions(text);
        let anna = mentions.iter().find(|m| m.name == "Anna").unwrap();
        assert_eq!(anna.count, 3);
    }

    #[test]
    fn test_character_cap() {
        let many: String = [
            "Alba", "Boris", "Clara", "Doran", "Elena", "Fenn", "Gilda", "Haro", "Inga", "Joren",
            "Kira", "Lom",
        ]
        .iter()
        .map(|n| format!("{} arrived.", n))
        .collect::<Vec<_>>()
        .join(" ");

        let mentions = extract_character_mentions(&many);
        assert_eq!(mentions.len(), MAX_CHARACTERS);
        assert_eq!(mentions[0].name, "Alba");
    }

    #[test]
    fn test_locations_case_insensitive() {
        let text = "The Castle stood above the forest, and beyond the forest lay the ocean.";
        let mentions = extract_location_mentions(text);

        let get = |name: &str| mentions.iter().find(|m| m.name == name).map(|m| m.count);
        assert_eq!(get("castle"), Some(1));
        assert_eq!(get("forest"), Some(2));
        assert_eq!(get("ocean"), Some(1));
        assert_eq!(get("river"), None);
    }
}
