//! Undirected edge types.

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::node::NodeId;

/// Unordered pair of node ids identifying an undirected edge.
///
/// The lexicographically smaller id is always stored first, so `(a, b)` and
/// `(b, a)` produce equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    low: NodeId,
    high: NodeId,
}

impl EdgeKey {
    /// Create a key for the unordered pair `{a, b}`.
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self {
                low: a.to_string(),
                high: b.to_string(),
            }
        } else {
            Self {
                low: b.to_string(),
                high: a.to_string(),
            }
        }
    }
}

/// A weighted undirected edge as it appears in the node-link document.
///
/// `source`/`target` keep the orientation the edge was first written with;
/// it carries no meaning beyond stable serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint
    pub source: NodeId,
    /// Second endpoint
    pub target: NodeId,
    /// Term-overlap size at creation or last recomputation
    #[serde(deserialize_with = "deserialize_weight")]
    pub weight: u32,
    /// Unrecognized attributes, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Edge {
    /// Create an edge with no extra attributes.
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, weight: u32) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
            extra: BTreeMap::new(),
        }
    }

    /// Unordered key for this edge.
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(&self.source, &self.target)
    }
}

/// Read a weight written either as an integer or as an integral float
/// (`2` or `2.0`).
fn deserialize_weight<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_u64() {
        return u32::try_from(n)
            .map_err(|_| de::Error::custom(format!("edge weight {n} out of range")));
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) => Ok(f as u32),
        _ => Err(de::Error::custom(format!(
            "edge weight must be a non-negative integer, got {number}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_is_unordered() {
        assert_eq!(EdgeKey::new("b", "a"), EdgeKey::new("a", "b"));
        assert_ne!(EdgeKey::new("a", "b"), EdgeKey::new("a", "c"));
        assert_eq!(Edge::new("b", "a", 1).key(), Edge::new("a", "b", 9).key());
    }

    #[test]
    fn test_integral_float_weight_is_accepted() {
        let edge: Edge = serde_json::from_str(r#"{"source":"a","target":"b","weight":2.0}"#).unwrap();
        assert_eq!(edge.weight, 2);
        // Written back as an integer
        assert_eq!(
            serde_json::to_string(&edge).unwrap(),
            r#"{"source":"a","target":"b","weight":2}"#
        );
    }

    #[test]
    fn test_fractional_or_negative_weight_is_rejected() {
        for raw in ["1.5", "-1", "-2.0", "4294967296"] {
            let json = format!(r#"{{"source":"a","target":"b","weight":{raw}}}"#);
            assert!(serde_json::from_str::<Edge>(&json).is_err(), "accepted {raw}");
        }
    }

    #[test]
    fn test_edge_serialization() {
        let edge = Edge::new("a", "b", 3);
        let json = serde_json::to_string(&edge).unwrap();
        assert_eq!(json, r#"{"source":"a","target":"b","weight":3}"#);
        let parsed: Edge = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, edge);
        assert_eq!(parsed.key(), EdgeKey::new("b", "a"));
    }
}
