//! 情感基调启发式
//!
//! 按三组固定关键词对小写词流做子串归类，输出三路占比

/// 正向情感关键词
const POSITIVE_WORDS: &[&str] = &[
    "joy", "love", "hope", "smile", "laugh", "happy", "bright", "warm", "triumph", "delight",
    "peace", "gentle",
];

/// 负向情感关键词
const NEGATIVE_WORDS: &[&str] = &[
    "fear", "dark", "death", "pain", "cry", "anger", "cold", "blood", "terror", "grief", "bitter",
    "shadow",
];

/// 中性叙事动词
const NEUTRAL_WORDS: &[&str] = &[
    "said", "walked", "looked", "turned", "moved", "asked", "replied", "thought", "stood", "took",
    "went", "saw",
];

/// 三路情感占比（百分比，三者相对于命中总数）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToneBreakdown {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

fn matches_any(word: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| word.contains(kw))
}

/// 对词流做情感归类
///
/// 每个词最多落入一个桶，优先级 positive → negative → neutral；
/// 除数下限为 1，空输入返回全零
pub fn analyze_tone(words: &[&str]) -> ToneBreakdown {
    let mut positive = 0usize;
    let mut negative = 0usize;
    let mut neutral = 0usize;

    for word in words {
        let lower = word.to_lowercase();
        if matches_any(&lower, POSITIVE_WORDS) {
            positive += 1;
        } else if matches_any(&lower, NEGATIVE_WORDS) {
            negative += 1;
        } else if matches_any(&lower, NEUTRAL_WORDS) {
            neutral += 1;
        }
    }

    let total = (positive + negative + neutral).max(1);
    let pct = |n: usize| ((n as f64 / total as f64) * 100.0).round() as u32;

    ToneBreakdown {
        positive: pct(positive),
        negative: pct(negative),
        neutral: pct(neutral),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_all_zero() {
        let tone = analyze_tone(&[]);
        assert_eq!(tone, ToneBreakdown::default());
    }

    #[test]
    fn test_no_matches_all_zero() {
        let tone = analyze_tone(&["the", "a", "of"]);
        assert_eq!(tone, ToneBreakdown::default());
    }

    #[test]
    fn test_each_word_lands_in_one_bucket() {
        // "smiled" 含 "smile"（正向），"darkness" 含 "dark"（负向），"said" 中性
        let tone = analyze_tone(&["smiled", "darkness", "said", "said"]);
        assert_eq!(tone.positive, 25);
        assert_eq!(tone.negative, 25);
        assert_eq!(tone.neutral, 50);
    }

    #[test]
    fn test_case_insensitive() {
        let tone = analyze_tone(&["LOVE", "Fear"]);
        assert_eq!(tone.positive, 50);
        assert_eq!(tone.negative, 50);
    }

    #[test]
    fn test_positive_bucket_wins_on_overlap() {
        // 一个词同时含正负关键词时，只进正向桶
        let tone = analyze_tone(&["lovefear"]);
        assert_eq!(tone.positive, 100);
        assert_eq!(tone.negative, 0);
    }
}
