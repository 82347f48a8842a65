//! Keyword Aggregator — the frequency bag behind the word cloud.

use std::collections::HashMap;

use serde::Serialize;

use crate::normalize::stopwords::is_word_cloud_stopword;

/// Word-cloud renderers typically cap the bag at this many words.
pub const DEFAULT_MAX_WORDS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: u64,
}

/// Counts whitespace-separated words in `text`, skipping stopwords and
/// bare numbers. Most frequent first; ties keep first appearance.
pub fn keyword_frequencies(text: &str, max_words: usize) -> Vec<KeywordCount> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();

    for word in text.split_whitespace().map(str::to_lowercase) {
        if is_word_cloud_stopword(&word) || word.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        match counts.get_mut(&word) {
            Some(count) => *count += 1,
            None => {
                counts.insert(word.clone(), 1);
                order.push(word);
            }
        }
    }

    let mut bag: Vec<KeywordCount> = order
        .into_iter()
        .map(|word| {
            let count = counts.get(&word).copied().unwrap_or(0);
            KeywordCount { word, count }
        })
        .collect();
    bag.sort_by(|a, b| b.count.cmp(&a.count));
    bag.truncate(max_words);
    bag
}
