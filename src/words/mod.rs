//! Pipeline B: word frequencies of a text document
//!
//! fetch -> tokenize -> map -> shuffle -> reduce -> top-N chart

pub mod chart;
pub mod display;
pub mod fetch;
pub mod mapreduce;
pub mod pool;
pub mod tokenize;

pub use chart::{render_bar_chart, top_words, TopWordsChart, WordFrequency};
pub use display::show_chart;
pub use fetch::{TextFetcher, TextSource};
pub use mapreduce::{count_words, WordCounts};
pub use tokenize::{strip_punctuation, tokenize};

use crate::error::{Error, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::info;

/// Options for one `words` run
#[derive(Debug, Clone)]
pub struct WordsOptions {
    pub source: TextSource,
    pub top_n: usize,
    pub workers: usize,
    pub timeout: Option<Duration>,
}

/// Outcome of a `words` run
#[derive(Debug, Clone, Serialize)]
pub struct WordsReport {
    pub source: String,
    pub total_tokens: usize,
    pub distinct_words: usize,
    pub top: Vec<WordFrequency>,
}

impl WordsReport {
    pub fn chart_title(&self) -> String {
        format!("Top {} Most Frequent Words", self.top.len())
    }

    /// Chart widget for the interactive view, bars filling the screen
    pub fn chart<'a>(&'a self, title: &'a str) -> TopWordsChart<'a> {
        TopWordsChart {
            title,
            subtitle: Some(self.source.as_str()),
            entries: &self.top,
            max_width: None,
        }
    }

    pub fn render_chart(&self, width: usize) -> String {
        render_bar_chart(&self.chart_title(), Some(&self.source), &self.top, width)
    }
}

/// Tokenize `text` and count every token
///
/// Returns the token count alongside the counts; the counts always sum to it.
pub async fn analyze(text: &str, workers: usize) -> Result<(usize, WordCounts)> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return Err(Error::Tokenize("no words found in text".to_string()));
    }

    let total = tokens.len();
    let counts = count_words(tokens, workers).await?;
    debug_assert_eq!(counts.total(), total as u64);
    Ok((total, counts))
}

/// Load the text, count its words and select the most frequent
pub async fn run(options: &WordsOptions) -> Result<WordsReport> {
    let text = options.source.load(options.timeout).await?;
    let (total_tokens, counts) = analyze(&text, options.workers).await?;

    info!(
        "Counted {} tokens, {} distinct words from {}",
        total_tokens,
        counts.len(),
        options.source
    );

    Ok(WordsReport {
        source: options.source.to_string(),
        total_tokens,
        distinct_words: counts.len(),
        top: counts.top(options.top_n),
    })
}
