use std::collections::HashMap;

use serde::Serialize;

use crate::models::AwardRecord;

const WORD_CLOUD_MIN_LEN: usize = 4;
const THEME_MIN_LEN: usize = 5;
const WORD_CLOUD_LIMIT: usize = 40;
const THEME_WORDS_LIMIT: usize = 10;

/// Filler words that dominate recognition messages without carrying theme
/// signal.
const STOP_WORDS: &[&str] = &[
    "that", "this", "your", "with", "have", "been", "from", "they", "will", "were",
    "team", "thank", "thanks", "work", "great", "just", "take", "want", "wanted",
    "much", "like", "also", "make", "know", "time", "more", "when", "very", "such",
    "some", "into", "about", "their", "would", "which", "there", "really", "always",
    "every", "what", "doing", "done", "made", "well", "even", "only", "here", "then",
    "over", "back", "each", "most", "could", "should", "during", "getting", "being",
    "going", "because", "year", "both", "last", "past", "while", "first", "given",
    "long", "close", "award", "today", "since", "where", "next", "week", "weeks",
    "month", "quick", "people", "across", "these", "those", "many", "another",
];

#[derive(Debug, Clone, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTheme {
    pub category_id: String,
    pub category: String,
    pub words: Vec<WordCount>,
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Lowercased alphabetic runs of at least `min_len` characters.
fn tokenize(message: &str, min_len: usize) -> Vec<String> {
    message
        .to_lowercase()
        .split(|c: char| !c.is_ascii_lowercase())
        .filter(|w| w.len() >= min_len && !is_stop_word(w))
        .map(str::to_string)
        .collect()
}

fn ranked(counts: HashMap<String, usize>, limit: usize) -> Vec<WordCount> {
    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then(a.word.cmp(&b.word)));
    words.truncate(limit);
    words
}

/// Global word-frequency cloud over all messages (top 40).
pub fn word_cloud(records: &[AwardRecord]) -> Vec<WordCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in records {
        for word in tokenize(&r.message, WORD_CLOUD_MIN_LEN) {
            *counts.entry(word).or_default() += 1;
        }
    }
    ranked(counts, WORD_CLOUD_LIMIT)
}

/// Top theme words per category (top 10 each, 5+ letter words only),
/// categories ordered by the strength of their leading word.
pub fn message_themes(records: &[AwardRecord]) -> Vec<CategoryTheme> {
    let mut by_category: HashMap<String, (String, HashMap<String, usize>)> = HashMap::new();
    for r in records {
        let label = if r.category_name.is_empty() {
            r.category_id.clone()
        } else {
            r.category_name.clone()
        };
        let entry = by_category
            .entry(label)
            .or_insert_with(|| (r.category_id.clone(), HashMap::new()));
        for word in tokenize(&r.message, THEME_MIN_LEN) {
            *entry.1.entry(word).or_default() += 1;
        }
    }

    let mut themes: Vec<CategoryTheme> = by_category
        .into_iter()
        .map(|(category, (category_id, counts))| CategoryTheme {
            category_id,
            category,
            words: ranked(counts, THEME_WORDS_LIMIT),
        })
        .collect();
    themes.sort_by(|a, b| {
        let a_top = a.words.first().map_or(0, |w| w.count);
        let b_top = b.words.first().map_or(0, |w| w.count);
        b_top.cmp(&a_top).then(a.category.cmp(&b.category))
    });
    themes
}
