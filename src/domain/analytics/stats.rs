//! 写作统计
//!
//! 对生成正文做确定性的描述统计：计数、可读性、情感基调、
//! 对话占比、节奏、词汇复杂度、实体提及、完成度。
//! 全部为输入的纯函数，无 I/O，空输入产出全零结果而非报错。

use regex::Regex;
use std::sync::OnceLock;

use super::extraction::{extract_character_mentions, extract_location_mentions, EntityMention};
use super::tone::{analyze_tone, ToneBreakdown};
use crate::domain::project::TargetLength;

/// 阅读速度（词/分钟）
pub const WORDS_PER_MINUTE: usize = 250;

/// "短句"阈值（词数，不含）
const SHORT_SENTENCE_WORDS: usize = 10;

/// "长句"阈值（词数，不含）
const LONG_SENTENCE_WORDS: usize = 20;

/// "复杂词"阈值（字符数，不含）
const COMPLEX_WORD_CHARS: usize = 6;

/// 一次分析快照
///
/// 派生值，不持久化，可随时重算
#[derive(Debug, Clone, PartialEq)]
pub struct WritingStats {
    pub total_words: usize,
    pub total_sentences: usize,
    pub total_paragraphs: usize,
    pub avg_words_per_sentence: u32,
    pub avg_sentences_per_paragraph: u32,
    /// 预估阅读时长（分钟，向上取整）
    pub estimated_reading_minutes: u32,
    /// 简化版 Flesch 可读性评分，0-100
    pub readability_score: u32,
    pub tone: ToneBreakdown,
    /// 引号内词数占比（百分比）
    pub dialogue_ratio: u32,
    /// 极短/极长句占比（百分比），越高节奏越跳跃
    pub pace_score: u32,
    /// 长词占比（百分比）
    pub lexical_complexity: u32,
    pub characters: Vec<EntityMention>,
    pub locations: Vec<EntityMention>,
    /// 相对目标篇幅的完成度（百分比，可超过 100）
    pub completion: u32,
}

fn blank_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r?\n\s*\r?\n").expect("valid regex"))
}

fn dialogue_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("\"[^\"]*\"|\u{201C}[^\u{201D}]*\u{201D}").expect("valid regex"))
}

fn split_words(content: &str) -> Vec<&str> {
    content.split_whitespace().collect()
}

fn split_sentences(content: &str) -> Vec<&str> {
    content
        .split(|c| matches!(c, '.' | '!' | '?'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn split_paragraphs(content: &str) -> Vec<&str> {
    blank_line_regex()
        .split(content)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn ratio_rounded(numerator: usize, denominator: usize) -> u32 {
    if denominator == 0 {
        0
    } else {
        (numerator as f64 / denominator as f64).round() as u32
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        ((part as f64 / whole as f64) * 100.0).round() as u32
    }
}

/// 简化版 Flesch Reading Ease
///
/// 有意省略了标准公式的音节项，只保留句长项；
/// 先四舍五入再钳制到 [0, 100]
fn readability_score(avg_words_per_sentence: u32) -> u32 {
    let raw = 206.835 - 1.015 * avg_words_per_sentence as f64;
    raw.round().clamp(0.0, 100.0) as u32
}

/// 引号内词数（直引号与弯引号成对匹配）
fn dialogue_word_count(content: &str) -> usize {
    dialogue_regex()
        .find_iter(content)
        .map(|m| {
            m.as_str()
                .trim_matches(|c| matches!(c, '"' | '\u{201C}' | '\u{201D}'))
                .split_whitespace()
                .count()
        })
        .sum()
}

/// 计算一段正文的完整统计
pub fn compute_stats(content: &str, target_length: TargetLength) -> WritingStats {
    let words = split_words(content);
    let sentences = split_sentences(content);
    let paragraphs = split_paragraphs(content);

    let total_words = words.len();
    let total_sentences = sentences.len();
    let total_paragraphs = paragraphs.len();

    let avg_words_per_sentence = ratio_rounded(total_words, total_sentences);
    let avg_sentences_per_paragraph = ratio_rounded(total_sentences, total_paragraphs);

    let estimated_reading_minutes = total_words.div_ceil(WORDS_PER_MINUTE) as u32;

    let extreme_sentences = sentences
        .iter()
        .filter(|s| {
            let wc = s.split_whitespace().count();
            wc < SHORT_SENTENCE_WORDS || wc > LONG_SENTENCE_WORDS
        })
        .count();

    let complex_words = words
        .iter()
        .filter(|w| w.chars().count() > COMPLEX_WORD_CHARS)
        .count();

    WritingStats {
        total_words,
        total_sentences,
        total_paragraphs,
        avg_words_per_sentence,
        avg_sentences_per_paragraph,
        estimated_reading_minutes,
        readability_score: readability_score(avg_words_per_sentence),
        tone: analyze_tone(&words),
        dialogue_ratio: percent(dialogue_word_count(content), total_words),
        pace_score: percent(extreme_sentences, total_sentences),
        lexical_complexity: percent(complex_words, total_words),
        characters: extract_character_mentions(content),
        locations: extract_location_mentions(content),
        completion: percent(total_words, target_length.target_words()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_zero_safe() {
        let stats = compute_stats("", TargetLength::Medium);

        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.total_sentences, 0);
        assert_eq!(stats.total_paragraphs, 0);
        assert_eq!(stats.avg_words_per_sentence, 0);
        assert_eq!(stats.avg_sentences_per_paragraph, 0);
        assert_eq!(stats.estimated_reading_minutes, 0);
        assert!(stats.readability_score <= 100);
        assert_eq!(stats.dialogue_ratio, 0);
        assert_eq!(stats.pace_score, 0);
        assert_eq!(stats.lexical_complexity, 0);
        assert!(stats.characters.is_empty());
        assert!(stats.locations.is_empty());
        assert_eq!(stats.completion, 0);
    }

    #[test]
    fn test_idempotent_on_same_input() {
        let text = "Anna said, \"Hello there.\" The castle gates opened slowly.";
        let a = compute_stats(text, TargetLength::Short);
        let b = compute_stats(text, TargetLength::Short);
        assert_eq!(a, b);
    }

    #[test]
    fn test_basic_counts() {
        let text = "One two three. Four five!\n\nSix seven eight nine?";
        let stats = compute_stats(text, TargetLength::Medium);

        assert_eq!(stats.total_words, 9);
        assert_eq!(stats.total_sentences, 3);
        assert_eq!(stats.total_paragraphs, 2);
        assert_eq!(stats.avg_words_per_sentence, 3);
        assert_eq!(stats.avg_sentences_per_paragraph, 2); // round(3 / 2)
    }

    #[test]
    fn test_readability_clamps_to_100() {
        // 平均句长 10 词: round(206.835 - 10.15) = 197，钳制到 100
        let sentence = "one two three four five six seven eight nine ten.";
        let text = sentence.repeat(3);
        let stats = compute_stats(&text, TargetLength::Medium);

        assert_eq!(stats.avg_words_per_sentence, 10);
        assert_eq!(stats.readability_score, 100);
    }

    #[test]
    fn test_readability_clamps_to_0() {
        // 平均句长 250 词时原始值为负，钳制到 0
        let long_sentence = format!("{}.", "word ".repeat(250).trim());
        let stats = compute_stats(&long_sentence, TargetLength::Medium);
        assert_eq!(stats.readability_score, 0);
    }

    #[test]
    fn test_dialogue_ratio_zero_without_quotes() {
        let stats = compute_stats("No one spoke at all that night.", TargetLength::Medium);
        assert_eq!(stats.dialogue_ratio, 0);
    }

    #[test]
    fn test_dialogue_ratio_counts_quoted_words() {
        // 9 词中 4 词在引号内
        let text = "She said \"come back right now\" and left quickly.";
        let stats = compute_stats(text, TargetLength::Medium);
        assert_eq!(stats.total_words, 9);
        assert_eq!(stats.dialogue_ratio, 44); // round(4 / 9 * 100)
    }

    #[test]
    fn test_curly_quotes_matched() {
        let text = "\u{201C}stay here\u{201D} she whispered.";
        let stats = compute_stats(text, TargetLength::Medium);
        assert!(stats.dialogue_ratio > 0);
    }

    #[test]
    fn test_pace_score_counts_extremes() {
        // 一句 3 词（短），一句 15 词（中等）→ 1/2 = 50%
        let text = "Stop right there. \
                    The caravan moved slowly along the dusty road toward the distant hills that evening then.";
        let stats = compute_stats(text, TargetLength::Medium);
        assert_eq!(stats.total_sentences, 2);
        assert_eq!(stats.pace_score, 50);
    }

    #[test]
    fn test_lexical_complexity() {
        // "extraordinary" (13 字符) 是 4 词中唯一的长词 → 25%
        let stats = compute_stats("an extraordinary tale now.", TargetLength::Medium);
        assert_eq!(stats.lexical_complexity, 25);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let text = "word ".repeat(251);
        let stats = compute_stats(&text, TargetLength::Medium);
        assert_eq!(stats.estimated_reading_minutes, 2);
    }

    #[test]
    fn test_completion_against_target() {
        // 500 词 / 50000 目标 = 1%
        let text = "word ".repeat(500);
        let stats = compute_stats(&text, TargetLength::Short);
        assert_eq!(stats.completion, 1);
    }

    #[test]
    fn test_entities_present_in_prose() {
        let text = "Mira crossed the river at dawn. Mira never looked back at the village.";
        let stats = compute_stats(text, TargetLength::Medium);

        assert!(stats.characters.iter().any(|m| m.name == "Mira" && m.count == 2));
        assert!(stats.locations.iter().any(|m| m.name == "river"));
        assert!(stats.locations.iter().any(|m| m.name == "village"));
    }
}
