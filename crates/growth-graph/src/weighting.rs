//! Term weighting: pick a document's representative terms.
//!
//! [`TfIdfWeighter`] ranks by TF-IDF against the corpus and degrades to
//! [`FrequencyWeighter`] ranking whenever TF-IDF yields no signal, so a
//! nonempty token list always produces nonempty terms.

use growth_types::{Backend, WeightingConfig};
use tracing::warn;

use crate::tfidf::{count_in_order, IdfMode, TfIdf};

/// Trait for ranking a document's terms.
pub trait TermWeighter: Send + Sync {
    /// Rank the distinct terms of `tokens` by descending weight.
    ///
    /// `corpus` is every document known to the graph, `tokens` included.
    /// At most the configured number of terms is returned.
    fn weigh(&self, corpus: &[Vec<String>], tokens: &[String]) -> Vec<(String, f64)>;

    /// Short implementation name for logs and stats.
    fn name(&self) -> &'static str;
}

/// Raw in-document frequency ranking.
///
/// Ties keep first-seen order.
pub struct FrequencyWeighter {
    max_terms: usize,
}

impl FrequencyWeighter {
    pub fn new(max_terms: usize) -> Self {
        Self { max_terms }
    }
}

impl TermWeighter for FrequencyWeighter {
    fn weigh(&self, _corpus: &[Vec<String>], tokens: &[String]) -> Vec<(String, f64)> {
        let (order, counts) = count_in_order(tokens);
        let mut ranked: Vec<(String, f64)> = order
            .into_iter()
            .map(|term| (term.to_string(), counts[term] as f64))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(self.max_terms);
        ranked
    }

    fn name(&self) -> &'static str {
        "frequency"
    }
}

/// TF-IDF ranking with frequency fallback.
pub struct TfIdfWeighter {
    mode: IdfMode,
    max_terms: usize,
    fallback: FrequencyWeighter,
}

impl TfIdfWeighter {
    pub fn new(config: &WeightingConfig) -> Self {
        let mode = if config.smooth_idf {
            IdfMode::Smooth
        } else {
            IdfMode::Raw
        };
        Self {
            mode,
            max_terms: config.max_terms,
            fallback: FrequencyWeighter::new(config.max_terms),
        }
    }
}

impl TermWeighter for TfIdfWeighter {
    fn weigh(&self, corpus: &[Vec<String>], tokens: &[String]) -> Vec<(String, f64)> {
        if tokens.is_empty() {
            return Vec::new();
        }

        let model = TfIdf::fit(corpus, self.mode);
        let ranked = model.top_terms(tokens, self.max_terms);
        if ranked.is_empty() {
            warn!(
                docs = model.doc_count(),
                "TF-IDF produced no weighted terms, falling back to frequency ranking"
            );
            return self.fallback.weigh(corpus, tokens);
        }
        ranked
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}

/// Build the weighter selected by `config.backend`.
pub fn weighter_for(config: &WeightingConfig) -> Box<dyn TermWeighter> {
    match config.backend {
        Backend::Rich => Box::new(TfIdfWeighter::new(config)),
        Backend::Minimal => Box::new(FrequencyWeighter::new(config.max_terms)),
    }
}
