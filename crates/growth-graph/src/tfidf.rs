//! TF-IDF (Term Frequency - Inverse Document Frequency) model.
//!
//! Pure Rust implementation over pre-tokenized documents.

use std::collections::{HashMap, HashSet};

/// How inverse document frequency is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdfMode {
    /// `ln((N + 1) / (df + 1)) + 1`, always positive
    Smooth,
    /// `log2(N / df)`, zero for terms present in every document
    Raw,
}

/// TF-IDF model fitted on a corpus of token lists.
///
/// Scoring a document uses its own term frequencies and the corpus-wide
/// document frequencies.
#[derive(Debug, Clone)]
pub struct TfIdf {
    /// Term -> document count (how many documents contain this term)
    doc_frequencies: HashMap<String, usize>,
    /// Number of documents
    doc_count: usize,
    mode: IdfMode,
}

impl TfIdf {
    /// Fit the model on a corpus of tokenized documents.
    pub fn fit<S: AsRef<str>>(corpus: &[Vec<S>], mode: IdfMode) -> Self {
        let mut doc_frequencies: HashMap<String, usize> = HashMap::new();

        for doc in corpus {
            let unique_terms: HashSet<&str> = doc.iter().map(|t| t.as_ref()).collect();
            for term in unique_terms {
                *doc_frequencies.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        Self {
            doc_frequencies,
            doc_count: corpus.len(),
            mode,
        }
    }

    /// Calculate inverse document frequency.
    pub fn idf(&self, term: &str) -> f64 {
        let df = *self.doc_frequencies.get(term).unwrap_or(&0) as f64;
        let n = self.doc_count as f64;

        match self.mode {
            IdfMode::Smooth => ((n + 1.0) / (df + 1.0)).ln() + 1.0,
            IdfMode::Raw => {
                if df == 0.0 {
                    return 0.0;
                }
                (n / df).log2()
            }
        }
    }

    /// Score every distinct term of `tokens`.
    ///
    /// TF is the in-document count divided by document length. Terms are
    /// returned in first-seen order; terms with a non-positive score are
    /// dropped.
    pub fn score<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<(String, f64)> {
        if tokens.is_empty() {
            return Vec::new();
        }

        let (order, counts) = count_in_order(tokens);
        let len = tokens.len() as f64;

        order
            .into_iter()
            .map(|term| {
                let tf = counts[term] as f64 / len;
                let weight = tf * self.idf(term);
                (term.to_string(), weight)
            })
            .filter(|(_, weight)| *weight > 0.0)
            .collect()
    }

    /// Score `tokens` and return the top `n` terms by descending weight.
    ///
    /// Ties keep first-seen order.
    pub fn top_terms<S: AsRef<str>>(&self, tokens: &[S], n: usize) -> Vec<(String, f64)> {
        let mut scores = self.score(tokens);
        // Stable sort keeps first-seen order among equal weights
        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scores.truncate(n);
        scores
    }

    /// Get document count.
    pub fn doc_count(&self) -> usize {
        self.doc_count
    }
}

/// Distinct terms in first-seen order plus their counts.
pub(crate) fn count_in_order<S: AsRef<str>>(tokens: &[S]) -> (Vec<&str>, HashMap<&str, usize>) {
    let mut order = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        let token = token.as_ref();
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }
    (order, counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_fit_counts() {
        let corpus = vec![doc("rust programming"), doc("python programming")];
        let tfidf = TfIdf::fit(&corpus, IdfMode::Smooth);
        assert_eq!(tfidf.doc_count(), 2);
        assert_eq!(tfidf.doc_frequencies.len(), 3);
    }

    #[test]
    fn test_smooth_idf_values() {
        let corpus = vec![doc("term1 term2"), doc("term1 term3"), doc("term1 term4")];
        let tfidf = TfIdf::fit(&corpus, IdfMode::Smooth);
        // term1 in all docs: ln(4/4)+1 = 1.0; term2 in one: ln(4/2)+1
        assert!((tfidf.idf("term1") - 1.0).abs() < 1e-9);
        assert!((tfidf.idf("term2") - (2.0f64.ln() + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_raw_idf_zero_for_ubiquitous_terms() {
        let corpus = vec![doc("alpha beta"), doc("alpha gamma")];
        let tfidf = TfIdf::fit(&corpus, IdfMode::Raw);
        assert_eq!(tfidf.idf("alpha"), 0.0);
        assert!((tfidf.idf("beta") - 1.0).abs() < 1e-9);
        assert_eq!(tfidf.idf("unseen"), 0.0);
    }

    #[test]
    fn test_score_drops_zero_weights() {
        let corpus = vec![doc("alpha beta"), doc("alpha gamma")];
        let tfidf = TfIdf::fit(&corpus, IdfMode::Raw);
        let scores = tfidf.score(&doc("alpha beta"));
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].0, "beta");
    }

    #[test]
    fn test_single_document_raw_mode_yields_nothing() {
        let corpus = vec![doc("alpha beta gamma")];
        let tfidf = TfIdf::fit(&corpus, IdfMode::Raw);
        assert!(tfidf.score(&corpus[0]).is_empty());
    }

    #[test]
    fn test_rare_term_outranks_common_term() {
        let corpus = vec![doc("alpha beta gamma"), doc("alpha delta")];
        let tfidf = TfIdf::fit(&corpus, IdfMode::Smooth);
        let top = tfidf.top_terms(&corpus[1], 10);
        let words: Vec<&str> = top.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["delta", "alpha"]);
    }

    #[test]
    fn test_top_terms_ties_keep_first_seen_order() {
        let corpus = vec![doc("gamma alpha beta")];
        let tfidf = TfIdf::fit(&corpus, IdfMode::Smooth);
        let top = tfidf.top_terms(&corpus[0], 10);
        let words: Vec<&str> = top.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["gamma", "alpha", "beta"]);
    }

    #[test]
    fn test_top_terms_truncates_and_sorts() {
        let corpus = vec![doc("rust rust rust systems memory"), doc("python scripting")];
        let tfidf = TfIdf::fit(&corpus, IdfMode::Smooth);
        let top = tfidf.top_terms(&corpus[0], 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, "rust");
        assert!(top[0].1 >= top[1].1);
    }

    #[test]
    fn test_empty_tokens() {
        let corpus: Vec<Vec<String>> = vec![];
        let tfidf = TfIdf::fit(&corpus, IdfMode::Smooth);
        let empty: Vec<String> = vec![];
        assert!(tfidf.score(&empty).is_empty());
    }

    #[test]
    fn test_count_in_order() {
        let tokens = doc("b a b c a b");
        let (order, counts) = count_in_order(&tokens);
        assert_eq!(order, vec!["b", "a", "c"]);
        assert_eq!(counts["b"], 3);
        assert_eq!(counts["a"], 2);
    }
}
