//! In-process MAP -> SHUFFLE -> REDUCE word counting
//!
//! Map and reduce are per-item functions run over the worker pool. Shuffle is
//! the one sequential stage: it owns the single grouping table, so it needs no
//! synchronization.

use super::chart::{top_words, WordFrequency};
use super::pool::map_ordered;
use crate::error::Result;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// A `(word, count)` pair flowing between stages
pub type Pair = (String, u64);

/// Final word -> occurrence count mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WordCounts {
    counts: HashMap<String, u64>,
}

impl WordCounts {
    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts; equals the number of tokens counted
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// The `n` most frequent words, ties broken alphabetically
    pub fn top(&self, n: usize) -> Vec<WordFrequency> {
        top_words(self, n)
    }
}

impl FromIterator<Pair> for WordCounts {
    fn from_iter<I: IntoIterator<Item = Pair>>(iter: I) -> Self {
        let mut counts = HashMap::new();
        for (word, count) in iter {
            *counts.entry(word).or_insert(0) += count;
        }
        Self { counts }
    }
}

/// Map one token to `(token, 1)`
pub fn map_word(word: String) -> Pair {
    (word, 1)
}

/// Group mapped values by word, keeping words in first-seen order
pub fn shuffle(pairs: Vec<Pair>) -> Vec<(String, Vec<u64>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<u64>)> = Vec::new();

    for (word, value) in pairs {
        match index.get(&word) {
            Some(&i) => groups[i].1.push(value),
            None => {
                index.insert(word.clone(), groups.len());
                groups.push((word, vec![value]));
            }
        }
    }

    groups
}

/// Sum the values of one group
pub fn reduce_group((word, values): (String, Vec<u64>)) -> Pair {
    (word, values.iter().sum())
}

pub async fn map_phase(tokens: Vec<String>, workers: usize) -> Result<Vec<Pair>> {
    map_ordered(tokens, workers, map_word).await
}

pub async fn reduce_phase(groups: Vec<(String, Vec<u64>)>, workers: usize) -> Result<WordCounts> {
    let reduced = map_ordered(groups, workers, reduce_group).await?;
    Ok(reduced.into_iter().collect())
}

/// Count tokens with a parallel map, a sequential shuffle and a parallel reduce
pub async fn count_words(tokens: Vec<String>, workers: usize) -> Result<WordCounts> {
    debug!("Map phase: {} tokens over {} workers", tokens.len(), workers);
    let mapped = map_phase(tokens, workers).await?;

    let groups = shuffle(mapped);
    debug!("Shuffle produced {} groups", groups.len());

    let counts = reduce_phase(groups, workers).await?;
    debug!("Reduce phase produced {} words", counts.len());
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::tokenize::tokenize;

    #[test]
    fn test_shuffle_groups_in_first_seen_order() {
        let pairs = vec![
            map_word("b".to_string()),
            map_word("a".to_string()),
            map_word("b".to_string()),
        ];

        assert_eq!(
            shuffle(pairs),
            vec![("b".to_string(), vec![1, 1]), ("a".to_string(), vec![1])]
        );
    }

    #[test]
    fn test_reduce_group_sums_values() {
        assert_eq!(
            reduce_group(("x".to_string(), vec![1, 1, 1])),
            ("x".to_string(), 3)
        );
    }

    #[tokio::test]
    async fn test_count_words_known_sentence() {
        let tokens = tokenize("the cat sat on the mat the cat ran");
        let counts = count_words(tokens, 4).await.unwrap();

        let expected: WordCounts = [
            ("the", 3),
            ("cat", 2),
            ("sat", 1),
            ("on", 1),
            ("mat", 1),
            ("ran", 1),
        ]
        .into_iter()
        .map(|(w, c)| (w.to_string(), c))
        .collect();
        assert_eq!(counts, expected);
    }

    #[tokio::test]
    async fn test_count_words_conserves_tokens() {
        let text = "It was the best of times, it was the worst of times; it was...";
        let tokens = tokenize(text);
        let total = tokens.len() as u64;

        let counts = count_words(tokens, 3).await.unwrap();
        assert_eq!(counts.total(), total);
        assert_eq!(counts.get("it"), Some(2));
        assert_eq!(counts.get("It"), Some(1));
    }

    #[tokio::test]
    async fn test_count_words_same_for_any_worker_count() {
        let tokens = tokenize("a b c a b a d e f a");
        let single = count_words(tokens.clone(), 1).await.unwrap();
        let many = count_words(tokens, 16).await.unwrap();
        assert_eq!(single, many);
    }

    #[tokio::test]
    async fn test_count_words_empty() {
        let counts = count_words(Vec::new(), 2).await.unwrap();
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_word_counts_serialize_as_map() {
        let counts: WordCounts = vec![("a".to_string(), 2)].into_iter().collect();
        assert_eq!(serde_json::to_string(&counts).unwrap(), r#"{"a":2}"#);
    }
}
