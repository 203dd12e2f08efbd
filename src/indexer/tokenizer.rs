use crate::error::{Error, Result};
use crate::indexer::tfidf::TermCounts;
use regex::Regex;

/// Word tokens of two or more characters
pub const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Lowercasing word tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(TOKEN_PATTERN)
            .map_err(|e| Error::Ranking(format!("Invalid token pattern: {e}")))?;
        Ok(Self { pattern })
    }

    /// Split text into lowercase tokens, in order of appearance
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.pattern
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Count occurrences of each token in `text`
    pub fn term_counts(&self, text: &str) -> TermCounts {
        let mut counts = TermCounts::new();
        for token in self.tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }
}
