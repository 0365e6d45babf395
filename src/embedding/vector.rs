//! Embedding vector value type.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A precomputed embedding vector for a pattern or example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingVector {
    /// Pattern or example identifier.
    pub id: String,
    /// The embedding components.
    pub embedding: Vec<f32>,
    /// Optional metadata carried alongside the vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl EmbeddingVector {
    /// Create a new embedding vector.
    pub fn new(id: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            embedding,
            metadata: None,
        }
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Number of dimensions.
    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }

    /// Check that the vector is non-empty and all components are finite.
    pub fn is_valid(&self) -> bool {
        !self.embedding.is_empty() && self.embedding.iter().all(|v| v.is_finite())
    }
}
