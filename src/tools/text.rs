//! Text utilities: tag stripping, counting, case, sorting, keywords.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::html;
use crate::params;
use crate::tools::round2;
use crate::Request;

/// Characters per manuscript page (200-square Korean manuscript paper, two sheets).
const CHARS_PER_PAGE: f64 = 400.0;
const MAX_KEYWORDS: usize = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TextParams {
    #[serde(deserialize_with = "params::text")]
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CaseParams {
    #[serde(deserialize_with = "params::text")]
    pub text: String,
    #[serde(deserialize_with = "params::text")]
    pub case_type: String,
}

impl Default for CaseParams {
    fn default() -> Self {
        Self { text: String::new(), case_type: "upper".into() }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SortParams {
    #[serde(deserialize_with = "params::text")]
    pub text: String,
    #[serde(deserialize_with = "params::text")]
    pub sort_type: String,
}

impl Default for SortParams {
    fn default() -> Self {
        Self { text: String::new(), sort_type: "alphabetical".into() }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CharCount {
    pub char_count_with_space: usize,
    pub char_count_without_space: usize,
    pub line_count: usize,
    pub paragraph_count: usize,
    pub manuscript_pages: f64,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

pub async fn remove_html(req: Request) -> Result<String, ToolError> {
    let p: TextParams = req.json()?;
    Ok(html::strip_tags(&p.text))
}

pub async fn count_chars(req: Request) -> Result<CharCount, ToolError> {
    let p: TextParams = req.json()?;
    Ok(char_count(&p.text))
}

pub async fn convert_case(req: Request) -> Result<String, ToolError> {
    let p: CaseParams = req.json()?;
    Ok(convert(&p.text, &p.case_type))
}

pub async fn sort_words(req: Request) -> Result<String, ToolError> {
    let p: SortParams = req.json()?;
    Ok(sort(&p.text, &p.sort_type))
}

pub async fn extract_keywords(req: Request) -> Result<Vec<String>, ToolError> {
    let p: TextParams = req.json()?;
    Ok(keywords(&p.text))
}

// ── Pure functions ────────────────────────────────────────────────────────────

pub fn char_count(text: &str) -> CharCount {
    let with_space = text.chars().count();
    let without_space = text.chars().filter(|c| !matches!(c, ' ' | '\n' | '\t')).count();

    CharCount {
        char_count_with_space: with_space,
        char_count_without_space: without_space,
        line_count: text.split('\n').count(),
        paragraph_count: text.split("\n\n").filter(|p| !p.trim().is_empty()).count(),
        manuscript_pages: round2(with_space as f64 / CHARS_PER_PAGE),
    }
}

/// `"upper"` upper-cases; anything else lower-cases.
pub fn convert(text: &str, case_type: &str) -> String {
    if case_type == "upper" {
        text.to_uppercase()
    } else {
        text.to_lowercase()
    }
}

/// Whitespace-split words re-joined with single spaces. Unknown sort types
/// keep the input order.
pub fn sort(text: &str, sort_type: &str) -> String {
    let mut words: Vec<&str> = text.split_whitespace().collect();
    match sort_type {
        "alphabetical" => words.sort_unstable(),
        "length" => words.sort_by_key(|w| w.chars().count()),
        _ => {}
    }
    words.join(" ")
}

/// Ten most frequent words longer than two characters, lowercased.
/// Equal counts keep the order of first appearance.
pub fn keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut order: Vec<&str> = Vec::new();
    let mut freq: HashMap<&str, usize> = HashMap::new();

    for word in lower.split(|c: char| !(c.is_alphanumeric() || c == '_')) {
        if word.chars().count() <= 2 {
            continue;
        }
        let n = freq.entry(word).or_insert(0);
        if *n == 0 {
            order.push(word);
        }
        *n += 1;
    }

    // Stable sort: ties stay in first-seen order.
    order.sort_by(|a, b| freq[b].cmp(&freq[a]));
    order.into_iter().take(MAX_KEYWORDS).map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn counts_text_statistics() {
        let c = char_count("Hello world\nSecond line\n\nNew paragraph");
        assert_eq!(c.char_count_with_space, 38);
        assert_eq!(c.char_count_without_space, 32);
        assert_eq!(c.line_count, 4);
        assert_eq!(c.paragraph_count, 2);
    }

    #[test]
    fn manuscript_pages_are_per_400_chars() {
        assert_eq!(char_count(&"가".repeat(1000)).manuscript_pages, 2.5);
        assert_eq!(char_count(&"a".repeat(100)).manuscript_pages, 0.25);
    }

    #[test]
    fn counts_empty_and_unicode_text() {
        let empty = char_count("");
        assert_eq!(empty.char_count_with_space, 0);
        assert_eq!(empty.line_count, 1);
        assert_eq!(empty.paragraph_count, 0);

        let korean = char_count("안녕 하세요");
        assert_eq!(korean.char_count_with_space, 6);
        assert_eq!(korean.char_count_without_space, 5);
    }

    #[test]
    fn blank_paragraphs_are_not_counted() {
        assert_eq!(char_count("a\n\n  \n\nb").paragraph_count, 2);
    }

    #[test]
    fn case_conversion() {
        assert_eq!(convert("Hello", "upper"), "HELLO");
        assert_eq!(convert("Hello", "lower"), "hello");
        assert_eq!(convert("Hello", "title"), "hello");
    }

    #[test]
    fn sorting_words() {
        assert_eq!(sort("pear apple fig", "alphabetical"), "apple fig pear");
        assert_eq!(sort("ccc a bb dd", "length"), "a bb dd ccc");
        assert_eq!(sort("  b   a ", "unknown"), "b a");
        assert_eq!(sort("", "length"), "");
    }

    #[test]
    fn alphabetical_is_code_point_order() {
        assert_eq!(sort("b B a A", "alphabetical"), "A B a b");
    }

    #[test]
    fn keywords_by_frequency_then_first_appearance() {
        let kws = keywords("Rust is fast. rust is safe; RUST and Go, safe go fast go");
        assert_eq!(kws, ["rust", "fast", "safe", "and"]);
    }

    #[test]
    fn keywords_cap_at_ten() {
        let text = (0..15).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
        assert_eq!(keywords(&text).len(), 10);
        assert!(keywords("a an to").is_empty());
    }

    #[test]
    fn keywords_handle_korean() {
        assert_eq!(keywords("프로그래밍 언어 프로그래밍"), ["프로그래밍"]);
    }

    proptest! {
        #[test]
        fn with_space_count_is_char_count(s in "\\PC{0,100}") {
            prop_assert_eq!(char_count(&s).char_count_with_space, s.chars().count());
        }

        #[test]
        fn length_sort_is_non_decreasing_and_stable(words in prop::collection::vec("[a-z]{1,6}", 0..20)) {
            let input = words.join(" ");
            let sorted = sort(&input, "length");
            let out: Vec<&str> = sorted.split_whitespace().collect();
            prop_assert!(out.windows(2).all(|w| w[0].len() <= w[1].len()));

            let mut expected = words.clone();
            expected.sort_by_key(|w| w.len());
            prop_assert_eq!(out, expected.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
