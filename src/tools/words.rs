//! Static word lookup by length and pattern.

use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::params;
use crate::Request;

const KOREAN_WORDS: &[&str] = &[
    "사과", "바나나", "포도", "딸기", "수박", "참외", "복숭아", "자두",
    "컴퓨터", "키보드", "마우스", "모니터", "스피커", "헤드폰",
    "학교", "도서관", "교실", "운동장", "급식실", "보건실",
    "가족", "친구", "선생님", "학생", "부모님", "형제",
    "음식", "밥", "국", "반찬", "김치", "라면", "피자", "햄버거",
];

const ENGLISH_WORDS: &[&str] = &[
    "apple", "banana", "grape", "strawberry", "watermelon", "peach",
    "computer", "keyboard", "mouse", "monitor", "speaker", "headphone",
    "school", "library", "classroom", "playground", "cafeteria",
    "family", "friend", "teacher", "student", "parent", "sibling",
    "food", "rice", "soup", "pizza", "hamburger", "sandwich",
];

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WordListParams {
    #[serde(deserialize_with = "params::text")]
    pub language: String,
    #[serde(deserialize_with = "params::count")]
    pub length: u32,
    #[serde(deserialize_with = "params::text")]
    pub contains: String,
    #[serde(deserialize_with = "params::text")]
    pub starts_with: String,
    #[serde(deserialize_with = "params::text")]
    pub ends_with: String,
}

impl Default for WordListParams {
    fn default() -> Self {
        Self {
            language: "korean".into(),
            length: 3,
            contains: String::new(),
            starts_with: String::new(),
            ends_with: String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WordList {
    pub words: Vec<&'static str>,
    pub count: usize,
    pub language: String,
    pub length: u32,
}

pub async fn word_list(req: Request) -> Result<WordList, ToolError> {
    let p: WordListParams = req.json()?;
    let words = matching_words(&p);
    Ok(WordList { count: words.len(), words, language: p.language, length: p.length })
}

/// Words of exactly `length` characters passing every non-empty filter,
/// in list order. `"korean"` picks the Korean list; anything else English.
pub fn matching_words(p: &WordListParams) -> Vec<&'static str> {
    let list = if p.language == "korean" { KOREAN_WORDS } else { ENGLISH_WORDS };
    list.iter()
        .copied()
        .filter(|w| w.chars().count() == p.length as usize)
        .filter(|w| p.contains.is_empty() || w.contains(p.contains.as_str()))
        .filter(|w| p.starts_with.is_empty() || w.starts_with(p.starts_with.as_str()))
        .filter(|w| p.ends_with.is_empty() || w.ends_with(p.ends_with.as_str()))
        .collect()
}
