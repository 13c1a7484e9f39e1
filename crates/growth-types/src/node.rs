//! Document node type.
//!
//! A node represents one ingested document. Its identity is derived from the
//! document's raw text, never from its path.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

/// Identifier of a document node (truncated hex SHA-256 of the raw text).
pub type NodeId = String;

/// Number of hex characters kept from the content digest.
pub const NODE_ID_LEN: usize = 8;

/// Full hex SHA-256 digest of a document's raw text.
pub fn content_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compute the content-addressed node id for a document's raw text.
///
/// Byte-identical text always yields the same id.
pub fn content_id(text: &str) -> NodeId {
    id_from_digest(&content_digest(text))
}

/// Truncate a full digest to a node id.
pub fn id_from_digest(digest: &str) -> NodeId {
    digest.chars().take(NODE_ID_LEN).collect()
}

/// Deserialize an attribute that may be absent, explicitly `null`, or set.
///
/// Absence falls back to `None` through `#[serde(default)]`; `null` becomes
/// `Some(None)` and is written back as `null`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A document in the growth graph.
///
/// Optional fields are skipped on serialization when absent. The auxiliary
/// fields distinguish an absent key (`None`) from an explicit `null`
/// (`Some(None)`). Attributes not modelled here are kept in `extra`, so
/// foreign graph files round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Content-addressed identifier
    pub id: NodeId,

    /// Source location (informational only)
    #[serde(default)]
    pub path: String,

    /// Full content digest, used to tell id collisions from re-ingestion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,

    /// Ranked representative terms, the node's semantic signature
    #[serde(default)]
    pub terms: Vec<String>,

    /// Free-text summary from summary-based ingestion
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<Option<String>>,

    /// Cluster labels from cluster-based ingestion
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub clusters: Option<Option<Vec<String>>>,

    /// Raw token list from token-based ingestion
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub tokens: Option<Option<Vec<String>>>,

    /// Curated one-line description
    #[serde(default)]
    pub sentence: String,

    /// Curated longer description
    #[serde(default)]
    pub paragraph: String,

    /// Whether the node has been annotated
    #[serde(default)]
    pub shaped: bool,

    /// Unrecognized attributes, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl DocumentNode {
    /// Create an unshaped node with the given ranked terms.
    pub fn new(id: impl Into<NodeId>, path: impl Into<String>, terms: Vec<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            digest: None,
            terms,
            summary: None,
            clusters: None,
            tokens: None,
            sentence: String::new(),
            paragraph: String::new(),
            shaped: false,
            extra: BTreeMap::new(),
        }
    }

    /// Attach the full content digest.
    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    /// The node's semantic signature: ranked terms, or raw tokens for nodes
    /// ingested without ranked terms.
    pub fn signature(&self) -> &[String] {
        match &self.tokens {
            Some(Some(tokens)) if self.terms.is_empty() => tokens,
            _ => &self.terms,
        }
    }

    /// The set of terms used for overlap computation.
    pub fn term_set(&self) -> HashSet<&str> {
        self.signature().iter().map(String::as_str).collect()
    }

    /// Whether `digest` identifies different content than this node's.
    ///
    /// Nodes persisted without a digest never report a collision.
    pub fn collides_with(&self, digest: &str) -> bool {
        self.digest.as_deref().is_some_and(|own| own != digest)
    }

    /// Apply curation fields and mark the node as shaped.
    pub fn shape(&mut self, sentence: impl Into<String>, paragraph: impl Into<String>) {
        self.sentence = sentence.into();
        self.paragraph = paragraph.into();
        self.shaped = true;
    }

    /// Merge attributes from a re-inserted node with the same id.
    ///
    /// `path` and `terms` are overwritten. Optional fields are overwritten
    /// only when present on `other`. Curation fields are overwritten only when
    /// `other` is shaped, so an unshaped re-insert never erases annotations.
    pub fn merge(&mut self, other: DocumentNode) {
        debug_assert_eq!(self.id, other.id);
        self.path = other.path;
        self.terms = other.terms;
        if other.digest.is_some() {
            self.digest = other.digest;
        }
        if other.summary.is_some() {
            self.summary = other.summary;
        }
        if other.clusters.is_some() {
            self.clusters = other.clusters;
        }
        if other.tokens.is_some() {
            self.tokens = other.tokens;
        }
        if other.shaped {
            self.sentence = other.sentence;
            self.paragraph = other.paragraph;
            self.shaped = true;
        }
        self.extra.extend(other.extra);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_content_id_is_deterministic() {
        assert_eq!(content_id("alpha beta"), content_id("alpha beta"));
        assert_eq!(content_id("alpha beta").len(), NODE_ID_LEN);
    }

    #[test]
    fn test_content_id_matches_sha256_prefix() {
        // sha256("") = e3b0c442...
        assert_eq!(content_id(""), "e3b0c442");
    }

    #[test]
    fn test_content_id_is_digest_prefix() {
        let digest = content_digest("alpha beta");
        assert_eq!(digest.len(), 64);
        assert!(digest.starts_with(&content_id("alpha beta")));
    }

    #[test]
    fn test_collides_with() {
        let node = DocumentNode::new("abcd1234", "a.md", Vec::new()).with_digest("abcd1234ff");
        assert!(!node.collides_with("abcd1234ff"));
        assert!(node.collides_with("abcd1234ee"));

        let legacy = DocumentNode::new("abcd1234", "a.md", Vec::new());
        assert!(!legacy.collides_with("abcd1234ee"));
    }

    #[test]
    fn test_content_id_differs_for_different_text() {
        assert_ne!(content_id("alpha beta"), content_id("alpha  beta"));
    }

    #[test]
    fn test_new_node_defaults() {
        let node = DocumentNode::new("abcd1234", "a.md", terms(&["alpha"]));
        assert!(!node.shaped);
        assert!(node.sentence.is_empty());
        assert!(node.paragraph.is_empty());
        assert!(node.summary.is_none());
    }

    #[test]
    fn test_term_set_falls_back_to_tokens() {
        let mut node = DocumentNode::new("abcd1234", "a.md", Vec::new());
        node.tokens = Some(Some(terms(&["alpha", "beta", "alpha"])));
        let set = node.term_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains("alpha"));

        node.tokens = Some(None);
        assert!(node.term_set().is_empty());
    }

    #[test]
    fn test_merge_keeps_shaping_on_unshaped_reinsert() {
        let mut node = DocumentNode::new("abcd1234", "a.md", terms(&["alpha"]));
        node.shape("A sentence", "A paragraph");

        let incoming = DocumentNode::new("abcd1234", "b.md", terms(&["beta"]));
        node.merge(incoming);

        assert_eq!(node.path, "b.md");
        assert_eq!(node.terms, terms(&["beta"]));
        assert!(node.shaped);
        assert_eq!(node.sentence, "A sentence");
    }

    #[test]
    fn test_merge_overwrites_present_optionals() {
        let mut node = DocumentNode::new("abcd1234", "a.md", Vec::new());
        node.summary = Some(Some("old".to_string()));

        let mut incoming = DocumentNode::new("abcd1234", "a.md", Vec::new());
        incoming.clusters = Some(Some(terms(&["c1"])));
        node.merge(incoming);

        assert_eq!(node.summary, Some(Some("old".to_string())));
        assert_eq!(node.clusters, Some(Some(terms(&["c1"]))));
    }

    #[test]
    fn test_serialization_skips_absent_optionals() {
        let node = DocumentNode::new("abcd1234", "a.md", terms(&["alpha"]));
        let json = serde_json::to_value(&node).unwrap();
        assert!(json.get("summary").is_none());
        assert_eq!(json["shaped"], serde_json::json!(false));
        assert_eq!(json["terms"], serde_json::json!(["alpha"]));
    }

    #[test]
    fn test_unknown_attributes_are_preserved() {
        let raw = r#"{"id":"abcd1234","path":"a.md","terms":[],"color":"red"}"#;
        let node: DocumentNode = serde_json::from_str(raw).unwrap();
        assert_eq!(node.extra["color"], serde_json::json!("red"));

        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["color"], serde_json::json!("red"));
    }

    #[test]
    fn test_explicit_null_attributes_are_kept() {
        let raw = r#"{"id":"abcd1234","path":"a.md","terms":[],"summary":null,"tokens":["x"]}"#;
        let node: DocumentNode = serde_json::from_str(raw).unwrap();
        assert_eq!(node.summary, Some(None));
        assert_eq!(node.clusters, None);
        assert_eq!(node.tokens, Some(Some(vec!["x".to_string()])));

        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back.get("summary"), Some(&serde_json::Value::Null));
        assert!(back.get("clusters").is_none());
        assert!(node.extra.is_empty());
    }

    #[test]
    fn test_id_from_digest_never_splits_characters() {
        assert_eq!(id_from_digest("aéééééééé"), "aééééééé");
        assert_eq!(id_from_digest("abc"), "abc");
        assert_eq!(id_from_digest(""), "");
    }
}
