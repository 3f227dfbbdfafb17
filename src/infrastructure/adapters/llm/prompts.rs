//! 提示词构造与补全解析
//!
//! 本地 LLM 路径在客户端拼装提示词，并把自由文本补全
//! 解析回结构化结果（编号列表、Title/Premise 行）

use crate::application::ports::GeneratedPremise;
use crate::domain::project::WritingStyle;

/// 前提生成提示词（system, user）
pub fn premise_prompt(genre: &str, themes: Option<&str>) -> (String, String) {
    let system = "You are a creative writing assistant specializing in novel concepts.".to_string();

    let themes_text = themes
        .map(|t| format!(" incorporating themes of {}", t))
        .unwrap_or_default();

    let user = format!(
        "Generate a compelling premise for a {genre} novel{themes_text}.\n\n\
         Provide both a title and a detailed premise in this format:\n\n\
         Title: [Novel Title]\n\
         Premise: [Detailed premise describing the main character, conflict, setting, and what makes this story unique]\n\n\
         The premise should be engaging and give a clear sense of the story's direction."
    );

    (system, user)
}

/// 大纲生成提示词（system, user）
pub fn outline_prompt(premise: &str, genre: &str) -> (String, String) {
    let system = "You are a professional novel writer creating detailed story outlines.".to_string();

    let user = format!(
        "Create a detailed chapter outline for a {genre} novel with the following premise:\n\n\
         {premise}\n\n\
         Generate 8-12 chapter summaries, each 1-2 sentences long. Format as a numbered list:\n\n\
         1. Chapter title - Brief description\n\
         2. Chapter title - Brief description\n\
         ...\n\n\
         Focus on story progression, character development, and maintaining reader engagement."
    );

    (system, user)
}

/// 章节生成提示词（system, user）
pub fn chapter_prompt(
    genre: &str,
    style: WritingStyle,
    chapter_summary: &str,
    previous_context: Option<&str>,
) -> (String, String) {
    let system = format!(
        "You are writing a {genre} novel. Create engaging, well-paced chapters \
         with rich descriptions and compelling dialogue."
    );

    let context = previous_context
        .map(|c| format!("Previous context: {}\n\n", c))
        .unwrap_or_default();

    let user = format!(
        "{context}Write a detailed chapter for a {genre} novel in {style} perspective.\n\n\
         Chapter summary: {chapter_summary}\n\n\
         Requirements:\n\
         - Write 1000-1500 words\n\
         - Use proper paragraphs with dialogue and narrative description\n\
         - Focus on character development and atmosphere\n\
         - Advance the plot meaningfully\n\
         - Include sensory details and emotional depth\n\
         - Maintain consistent tone and style\n\n\
         Begin writing the chapter:",
        style = style.prompt_description(),
    );

    (system, user)
}

/// 把补全文本解析为大纲条目
///
/// 保留以数字或 '-' 开头的行，剥掉编号前缀；
/// 一条都解析不出时整段文本作为唯一条目
pub fn parse_outline(text: &str) -> Vec<String> {
    let mut chapters = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        let leads_with_number = line.chars().next().is_some_and(|c| c.is_ascii_digit());
        if line.is_empty() || !(leads_with_number || line.starts_with('-')) {
            continue;
        }

        let chapter = match line.split_once('.') {
            Some((_, rest)) => rest.trim(),
            None => line,
        };
        if !chapter.is_empty() {
            chapters.push(chapter.to_string());
        }
    }

    if chapters.is_empty() {
        vec![text.to_string()]
    } else {
        chapters
    }
}

/// 从补全文本解析标题与前提
///
/// 逐行找 `Title:` / `Premise:` 前缀（大小写不敏感）；
/// 缺失时标题回退为 "A {genre} Tale"，前提回退为整段文本
pub fn parse_premise(text: &str, genre: &str) -> GeneratedPremise {
    let mut title = None;
    let mut premise = None;

    for line in text.lines() {
        let line = line.trim();
        let lower = line.to_lowercase();
        if lower.starts_with("title:") {
            title = line.split_once(':').map(|(_, rest)| rest.trim().to_string());
        } else if lower.starts_with("premise:") {
            premise = line.split_once(':').map(|(_, rest)| rest.trim().to_string());
        }
    }

    GeneratedPremise {
        title: title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("A {} Tale", genre)),
        premise: premise
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| text.to_string()),
    }
}
