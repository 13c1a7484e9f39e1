//! Topic clustering over node term sets.
//!
//! [`KMeansClusterer`] vectorizes each node's terms with smoothed TF-IDF and
//! runs seeded k-means. [`FrequencyClusterer`] reports a single cluster of the
//! most common terms.

use std::collections::{BTreeSet, HashMap};

use growth_types::{Backend, ClusteringConfig, DocumentNode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::similarity::{calculate_centroid, normalize, squared_distance};
use crate::tfidf::{IdfMode, TfIdf};

/// Groups nodes into topics, each described by its top terms.
pub trait ClusterEngine: Send + Sync {
    /// Cluster `nodes` into at most `max_clusters` groups.
    ///
    /// Empty input or `max_clusters == 0` yields an empty list.
    fn cluster(&self, nodes: &[&DocumentNode], max_clusters: usize) -> Vec<Vec<String>>;

    /// Short implementation name for logs and stats.
    fn name(&self) -> &'static str;
}

/// Seeded k-means over TF-IDF term vectors.
#[derive(Debug, Clone)]
pub struct KMeansClusterer {
    top_terms: usize,
    seed: u64,
    max_iterations: usize,
}

impl KMeansClusterer {
    pub fn new(config: &ClusteringConfig) -> Self {
        Self {
            top_terms: config.top_terms,
            seed: config.seed,
            max_iterations: config.max_iterations,
        }
    }

    /// k-means++ initialization.
    ///
    /// Stops early when every remaining point coincides with a center.
    fn seed_centers(&self, vectors: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
        let mut centers = vec![vectors[rng.random_range(0..vectors.len())].clone()];

        while centers.len() < k {
            let distances: Vec<f64> = vectors
                .iter()
                .map(|v| {
                    centers
                        .iter()
                        .map(|c| squared_distance(v, c))
                        .fold(f64::INFINITY, f64::min)
                })
                .collect();
            let total: f64 = distances.iter().sum();
            if total <= 0.0 {
                break;
            }

            let target = rng.random::<f64>() * total;
            let mut cumulative = 0.0;
            let mut chosen = vectors.len() - 1;
            for (i, d) in distances.iter().enumerate() {
                cumulative += d;
                if cumulative >= target && *d > 0.0 {
                    chosen = i;
                    break;
                }
            }
            centers.push(vectors[chosen].clone());
        }
        centers
    }

    /// Index of the nearest center, lowest index on ties.
    fn nearest(vector: &[f64], centers: &[Vec<f64>]) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, center) in centers.iter().enumerate() {
            let dist = squared_distance(vector, center);
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }

    /// Lloyd iterations. Returns final centers and point assignments.
    fn lloyd(&self, vectors: &[Vec<f64>], mut centers: Vec<Vec<f64>>) -> (Vec<Vec<f64>>, Vec<usize>) {
        let mut assignments = vec![usize::MAX; vectors.len()];

        for iteration in 0..self.max_iterations.max(1) {
            let mut changed = false;
            for (i, vector) in vectors.iter().enumerate() {
                let nearest = Self::nearest(vector, &centers);
                if assignments[i] != nearest {
                    assignments[i] = nearest;
                    changed = true;
                }
            }
            if !changed {
                debug!(iteration, "k-means converged");
                break;
            }

            for (c, center) in centers.iter_mut().enumerate() {
                let members: Vec<&[f64]> = vectors
                    .iter()
                    .zip(&assignments)
                    .filter(|(_, a)| **a == c)
                    .map(|(v, _)| v.as_slice())
                    .collect();
                // Empty clusters keep their previous center
                if !members.is_empty() {
                    *center = calculate_centroid(&members);
                }
            }
        }
        (centers, assignments)
    }

    /// Highest-weighted vocabulary terms of a center.
    fn describe(&self, center: &[f64], vocabulary: &[&str]) -> Vec<String> {
        let mut ranked: Vec<(usize, f64)> = center
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, w)| *w > 0.0)
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked
            .into_iter()
            .take(self.top_terms)
            .map(|(i, _)| vocabulary[i].to_string())
            .collect()
    }
}

impl ClusterEngine for KMeansClusterer {
    fn cluster(&self, nodes: &[&DocumentNode], max_clusters: usize) -> Vec<Vec<String>> {
        let corpus: Vec<Vec<&str>> = nodes
            .iter()
            .map(|n| n.signature().iter().map(String::as_str).collect::<Vec<_>>())
            .filter(|doc| !doc.is_empty())
            .collect();
        if corpus.is_empty() || max_clusters == 0 {
            return Vec::new();
        }

        let vocabulary: Vec<&str> = corpus
            .iter()
            .flatten()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let column: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (*t, i))
            .collect();

        let model = TfIdf::fit(&corpus, IdfMode::Smooth);
        let vectors: Vec<Vec<f64>> = corpus
            .iter()
            .map(|doc| {
                let mut row = vec![0.0; vocabulary.len()];
                for (term, weight) in model.score(doc) {
                    if let Some(&i) = column.get(term.as_str()) {
                        row[i] = weight;
                    }
                }
                normalize(&mut row);
                row
            })
            .collect();

        let n = vectors.len();
        let k = n.max(3).min(max_clusters).min(n);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let centers = self.seed_centers(&vectors, k, &mut rng);
        let (centers, assignments) = self.lloyd(&vectors, centers);

        debug!(
            nodes = n,
            vocabulary = vocabulary.len(),
            k,
            seeded = centers.len(),
            "Clustered nodes"
        );

        centers
            .iter()
            .enumerate()
            .filter(|(c, _)| assignments.contains(c))
            .map(|(_, center)| self.describe(center, &vocabulary))
            .filter(|terms| !terms.is_empty())
            .collect()
    }

    fn name(&self) -> &'static str {
        "kmeans"
    }
}

/// Single cluster of the most frequent terms across all nodes.
#[derive(Debug, Clone)]
pub struct FrequencyClusterer {
    top_terms: usize,
}

impl FrequencyClusterer {
    pub fn new(top_terms: usize) -> Self {
        Self { top_terms }
    }
}

impl ClusterEngine for FrequencyClusterer {
    fn cluster(&self, nodes: &[&DocumentNode], max_clusters: usize) -> Vec<Vec<String>> {
        if max_clusters == 0 {
            return Vec::new();
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for node in nodes {
            for term in node.signature() {
                *counts.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if counts.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        let top: Vec<String> = ranked
            .into_iter()
            .take(self.top_terms)
            .map(|(t, _)| t.to_string())
            .collect();
        vec![top]
    }

    fn name(&self) -> &'static str {
        "frequency"
    }
}

/// Build the clusterer selected by `config.backend`.
pub fn clusterer_for(config: &ClusteringConfig) -> Box<dyn ClusterEngine> {
    match config.backend {
        Backend::Rich => Box::new(KMeansClusterer::new(config)),
        Backend::Minimal => Box::new(FrequencyClusterer::new(config.top_terms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, terms: &[&str]) -> DocumentNode {
        DocumentNode::new(id, "", terms.iter().map(|t| t.to_string()).collect())
    }

    fn sample() -> Vec<DocumentNode> {
        vec![
            node("a", &["apple", "banana", "cherry"]),
            node("b", &["apple", "banana"]),
            node("c", &["rocket", "orbit", "launch"]),
            node("d", &["rocket", "orbit"]),
            node("e", &["violin", "cello"]),
        ]
    }

    #[test]
    fn test_kmeans_empty_input() {
        let clusterer = KMeansClusterer::new(&ClusteringConfig::default());
        assert!(clusterer.cluster(&[], 5).is_empty());

        let nodes = sample();
        let refs: Vec<&DocumentNode> = nodes.iter().collect();
        assert!(clusterer.cluster(&refs, 0).is_empty());
    }

    #[test]
    fn test_kmeans_bound() {
        let clusterer = KMeansClusterer::new(&ClusteringConfig::default());
        let nodes = sample();
        let refs: Vec<&DocumentNode> = nodes.iter().collect();
        for k in 0..8 {
            let clusters = clusterer.cluster(&refs, k);
            assert!(clusters.len() <= k, "k={k} got {}", clusters.len());
            if k > 0 {
                assert!(!clusters.is_empty());
            }
        }
    }

    #[test]
    fn test_kmeans_is_deterministic() {
        let clusterer = KMeansClusterer::new(&ClusteringConfig::default());
        let nodes = sample();
        let refs: Vec<&DocumentNode> = nodes.iter().collect();
        assert_eq!(clusterer.cluster(&refs, 3), clusterer.cluster(&refs, 3));
    }

    #[test]
    fn test_kmeans_terms_come_from_vocabulary() {
        let config = ClusteringConfig {
            top_terms: 2,
            ..ClusteringConfig::default()
        };
        let clusterer = KMeansClusterer::new(&config);
        let nodes = sample();
        let refs: Vec<&DocumentNode> = nodes.iter().collect();
        let vocabulary: BTreeSet<&str> = nodes
            .iter()
            .flat_map(|n| n.terms.iter().map(String::as_str))
            .collect();

        for cluster in clusterer.cluster(&refs, 5) {
            assert!(!cluster.is_empty() && cluster.len() <= 2);
            assert!(cluster.iter().all(|t| vocabulary.contains(t.as_str())));
        }
    }

    #[test]
    fn test_kmeans_identical_nodes_form_one_cluster() {
        let nodes = vec![
            node("a", &["same", "terms"]),
            node("b", &["same", "terms"]),
            node("c", &["same", "terms"]),
        ];
        let refs: Vec<&DocumentNode> = nodes.iter().collect();
        let clusters = KMeansClusterer::new(&ClusteringConfig::default()).cluster(&refs, 3);
        assert_eq!(clusters, vec![vec!["same".to_string(), "terms".to_string()]]);
    }

    #[test]
    fn test_kmeans_skips_nodes_without_terms() {
        let nodes = vec![node("a", &[]), node("b", &["solo"])];
        let refs: Vec<&DocumentNode> = nodes.iter().collect();
        let clusters = KMeansClusterer::new(&ClusteringConfig::default()).cluster(&refs, 5);
        assert_eq!(clusters, vec![vec!["solo".to_string()]]);
    }

    #[test]
    fn test_frequency_clusterer() {
        let nodes = vec![
            node("a", &["beta", "alpha"]),
            node("b", &["alpha", "gamma"]),
            node("c", &["beta", "alpha"]),
        ];
        let refs: Vec<&DocumentNode> = nodes.iter().collect();
        let clusters = FrequencyClusterer::new(2).cluster(&refs, 5);
        assert_eq!(clusters, vec![vec!["alpha".to_string(), "beta".to_string()]]);

        assert!(FrequencyClusterer::new(2).cluster(&refs, 0).is_empty());
        assert!(FrequencyClusterer::new(2).cluster(&[], 5).is_empty());
    }

    #[test]
    fn test_clusterer_for_backend() {
        assert_eq!(clusterer_for(&ClusteringConfig::default()).name(), "kmeans");
        let minimal = ClusteringConfig {
            backend: Backend::Minimal,
            ..ClusteringConfig::default()
        };
        assert_eq!(clusterer_for(&minimal).name(), "frequency");
    }
}
