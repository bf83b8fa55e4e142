//! Prompt construction and response parsing

use crate::model::{Article, Classification, SimilarityVerdict};
use crate::ports::ClassifierError;
use crate::taxonomy::{CATEGORIES, LabelDef, TYPES};

/// Characters of article content embedded in the classification prompt
pub const CONTENT_CHAR_LIMIT: usize = 1000;

/// Most recent history entries considered by the duplicate check
pub const HISTORY_WINDOW: usize = 20;

/// Literal the model returns when an article is not a duplicate
pub const NEW_ARTICLE_SENTINEL: &str = "NEW";

/// First `limit` characters of `text`, never splitting a code point
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Last `window` entries of `history`, order preserved
pub fn recent_window<S>(history: &[S], window: usize) -> &[S] {
    &history[history.len().saturating_sub(window)..]
}

fn push_rules(prompt: &mut String, defs: &[LabelDef]) {
    for def in defs {
        prompt.push_str(&format!(
            "   - {} ({}): {}\n",
            def.label, def.english, def.rule
        ));
    }
}

/// Build the classification prompt
pub fn build_classification_prompt(article: &Article) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are an expert news classifier for the Ministry of Culture, Sports and Tourism (MCST) of Korea.\n");
    prompt.push_str("Analyze the following news article and classify it into \"Category\" and \"Type\".\n\n");

    prompt.push_str("[Article]\n");
    prompt.push_str(&format!("Title: {}\n", article.title));
    prompt.push_str(&format!(
        "Content Snippet: {}\n\n",
        truncate_chars(&article.content, CONTENT_CHAR_LIMIT)
    ));

    prompt.push_str("[Classification Rules]\n");
    prompt.push_str("1. Category (Choose one):\n");
    push_rules(&mut prompt, CATEGORIES);
    prompt.push('\n');
    prompt.push_str("2. Type (Choose one):\n");
    push_rules(&mut prompt, TYPES);
    prompt.push('\n');

    prompt.push_str(
        r#"[Output Format]
Return ONLY a JSON object. Do not include markdown formatting (```json ... ```).
{
  "category": "...",
  "type": "..."
}
"#,
    );

    prompt
}

/// Build the duplicate-check prompt from an already windowed history
pub fn build_similarity_prompt<S: AsRef<str>>(new_title: &str, recent: &[S]) -> String {
    let existing = recent
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Determine if the [New Article] is effectively covering the SAME EVENT or TOPIC as any of the [Existing Articles].
Ignore minor differences in phrasing. Focus on the core event/subject.

[New Article]
{new_title}

[Existing Articles]
{existing}

[Task]
If the [New Article] is a duplicate of any existing one, return the Title of the existing article.
If it is new, return "{NEW_ARTICLE_SENTINEL}".

Return ONLY the result string.
"#
    )
}

/// Remove markdown code fences the model may wrap JSON in
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse classification response text
pub fn parse_classification(text: &str) -> Result<Classification, ClassifierError> {
    let json = strip_code_fences(text);
    if json.is_empty() {
        return Err(ClassifierError::MalformedResponse {
            message: "no content after removing code fences".to_string(),
            raw: text.to_string(),
        });
    }

    serde_json::from_str(&json).map_err(|e| ClassifierError::MalformedResponse {
        message: format!("Failed to parse JSON: {}", e),
        raw: text.to_string(),
    })
}

/// Parse duplicate-check response text
///
/// Any trimmed text other than the sentinel is taken as the matched title,
/// even when nothing is left after trimming.
pub fn parse_similarity(text: &str) -> SimilarityVerdict {
    let result = text.trim();
    if result == NEW_ARTICLE_SENTINEL {
        SimilarityVerdict::new_article()
    } else {
        SimilarityVerdict::duplicate(result)
    }
}
