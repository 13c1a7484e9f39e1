//! Term extraction: raw text to filtered, lowercase, alphabetic tokens.
//!
//! Two implementations share the [`TermExtractor`] trait:
//! - [`UnicodeTokenizer`] splits on Unicode word runs and keeps alphabetic
//!   tokens in any script.
//! - [`RegexTokenizer`] matches ASCII letter runs only.
//!
//! Both are pure functions of their input and never fail on a string.

use std::collections::HashSet;

use growth_types::{Backend, ExtractionConfig};
use regex::Regex;

use crate::error::{GraphError, GraphResult};

/// Built-in English stopword list.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "or", "that", "the", "to", "was", "were", "will", "with", "this", "they",
    "but", "have", "had", "what", "when", "where", "who", "which", "why", "how", "all", "each",
    "every", "both", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "can", "just", "should", "now", "also", "been",
    "being", "do", "does", "did", "doing", "would", "could", "might", "must", "shall", "about",
    "above", "after", "again", "against", "am", "any", "before", "below", "between", "into",
    "through", "during", "out", "off", "over", "under", "up", "down", "then", "once", "here",
    "there", "if", "else", "while", "because", "until", "further", "we", "you", "your", "our",
    "their", "him", "her", "them", "me", "my", "myself", "itself", "those", "these", "his", "i",
    "she", "us",
];

/// Trait for turning raw text into a term list.
pub trait TermExtractor: Send + Sync {
    /// Tokenize `text` into lowercase alphabetic tokens with stopwords removed.
    ///
    /// Order follows appearance in the text; repeats are kept.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Short implementation name for logs and stats.
    fn name(&self) -> &'static str;
}

/// Stopword set: the built-in list plus configured extras.
#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Build the set from the built-in list and `extra` words.
    pub fn new(extra: &[String]) -> Self {
        let mut words: HashSet<String> = STOP_WORDS.iter().map(|w| w.to_string()).collect();
        words.extend(extra.iter().map(|w| w.to_lowercase()));
        Self { words }
    }

    /// Check if a word is a stopword.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new(&[])
    }
}

/// Unicode-aware word tokenizer.
pub struct UnicodeTokenizer {
    word: Regex,
    stopwords: Stopwords,
    min_len: usize,
}

impl UnicodeTokenizer {
    /// Create a tokenizer from extraction settings.
    pub fn new(config: &ExtractionConfig) -> GraphResult<Self> {
        let word = Regex::new(r"\w+").map_err(|e| GraphError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            word,
            stopwords: Stopwords::new(&config.extra_stopwords),
            min_len: config.min_token_len,
        })
    }
}

impl TermExtractor for UnicodeTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.word
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| t.chars().all(char::is_alphabetic))
            .filter(|t| t.chars().count() >= self.min_len)
            .filter(|t| !self.stopwords.contains(t))
            .map(String::from)
            .collect()
    }

    fn name(&self) -> &'static str {
        "unicode"
    }
}

/// ASCII regular-expression tokenizer.
pub struct RegexTokenizer {
    word: Regex,
    stopwords: Stopwords,
}

impl RegexTokenizer {
    /// Create a tokenizer from extraction settings.
    pub fn new(config: &ExtractionConfig) -> GraphResult<Self> {
        let pattern = format!(r"\b[a-z]{{{},}}\b", config.min_token_len);
        let word = Regex::new(&pattern).map_err(|e| GraphError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            word,
            stopwords: Stopwords::new(&config.extra_stopwords),
        })
    }
}

impl TermExtractor for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.word
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.stopwords.contains(t))
            .map(String::from)
            .collect()
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

/// Build the extractor selected by `config.backend`.
pub fn extractor_for(config: &ExtractionConfig) -> GraphResult<Box<dyn TermExtractor>> {
    Ok(match config.backend {
        Backend::Rich => Box::new(UnicodeTokenizer::new(config)?),
        Backend::Minimal => Box::new(RegexTokenizer::new(config)?),
    })
}
