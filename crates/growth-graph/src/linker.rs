//! Term-overlap edge construction.

use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::similarity::{overlap_similarity, term_overlap};
use crate::store::GraphStore;

/// Reject similarity thresholds outside `[0, 1]`, NaN included.
pub fn check_threshold(threshold: f64) -> GraphResult<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(GraphError::InvalidInput(format!(
            "threshold must be within [0, 1], got {threshold}"
        )));
    }
    Ok(())
}

/// Connects nodes whose term sets intersect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityLinker;

/// A candidate neighbor: id, overlap size, overlap similarity.
struct Candidate {
    id: String,
    overlap: usize,
    similarity: f64,
}

impl SimilarityLinker {
    pub fn new() -> Self {
        Self
    }

    /// Every other node sharing at least one term with `id`.
    fn candidates(store: &dyn GraphStore, id: &str) -> GraphResult<Vec<Candidate>> {
        let node = store
            .node(id)
            .ok_or_else(|| GraphError::NotFound(id.to_string()))?;
        let terms = node.term_set();

        let candidates = store
            .nodes()
            .filter(|other| other.id != id)
            .filter_map(|other| {
                let other_terms = other.term_set();
                let overlap = term_overlap(&terms, &other_terms);
                (overlap > 0).then(|| Candidate {
                    id: other.id.clone(),
                    overlap,
                    similarity: overlap_similarity(overlap, terms.len(), other_terms.len()),
                })
            })
            .collect();
        Ok(candidates)
    }

    /// Link `id` to every node it shares terms with, weighting each edge by
    /// the overlap size. Existing edges get their weight recomputed.
    ///
    /// Returns the number of edges written.
    pub fn link(&self, store: &mut dyn GraphStore, id: &str) -> GraphResult<usize> {
        let candidates = Self::candidates(store, id)?;
        for candidate in &candidates {
            let weight = u32::try_from(candidate.overlap).unwrap_or(u32::MAX);
            store.add_edge(id, &candidate.id, weight)?;
            debug!(source = id, target = %candidate.id, weight, "Linked nodes");
        }
        Ok(candidates.len())
    }

    /// Add edges from `id` to unconnected nodes whose overlap similarity is
    /// at least `threshold`.
    ///
    /// Returns the number of edges added.
    pub fn expand(
        &self,
        store: &mut dyn GraphStore,
        id: &str,
        threshold: f64,
    ) -> GraphResult<usize> {
        check_threshold(threshold)?;

        let mut added = 0;
        for candidate in Self::candidates(store, id)? {
            if candidate.similarity < threshold || store.has_edge(id, &candidate.id) {
                continue;
            }
            let weight = u32::try_from(candidate.overlap).unwrap_or(u32::MAX);
            store.add_edge(id, &candidate.id, weight)?;
            debug!(
                source = id,
                target = %candidate.id,
                weight,
                similarity = candidate.similarity,
                "Expanded edge"
            );
            added += 1;
        }
        Ok(added)
    }
}
