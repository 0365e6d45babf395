//! Shard file format and the async shard loading seam.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ProteaError, Result};

/// One id's payload inside a shard file.
///
/// `hash` and `last_updated` are written by the embedding pipeline for
/// versioning; this crate carries them but never diffs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardEntry {
    /// The embedding components.
    pub embedding: Vec<f32>,
    /// Content hash of the source text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// When the embedding was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ShardEntry {
    /// Create an entry from raw embedding components.
    pub fn new(embedding: Vec<f32>) -> Self {
        Self {
            embedding,
            hash: None,
            last_updated: None,
        }
    }
}

/// Decoded contents of one shard: id → entry.
pub type ShardData = HashMap<String, ShardEntry>;

/// Async source of shard data.
///
/// Implementations fetch one shard per call; the [`EmbeddingStore`] is
/// responsible for caching, so a source is asked for a given shard at most
/// once per store lifetime.
///
/// [`EmbeddingStore`]: crate::embedding::EmbeddingStore
#[async_trait]
pub trait ShardSource: Send + Sync {
    /// Load and decode one shard.
    ///
    /// A missing or undecodable shard is an error here; the store maps both
    /// to "unavailable" and keeps serving the rest of the catalog.
    async fn load_shard(&self, shard_id: &str) -> Result<ShardData>;
}

/// Shard source reading `<root>/<shard_id>.json` files.
#[derive(Debug, Clone)]
pub struct FilesystemShardSource {
    root: PathBuf,
}

impl FilesystemShardSource {
    /// Create a source rooted at a shard directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory shards are read from.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl ShardSource for FilesystemShardSource {
    async fn load_shard(&self, shard_id: &str) -> Result<ShardData> {
        let path = self.root.join(format!("{shard_id}.json"));
        let bytes = tokio::fs::read(&path).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ProteaError::malformed_shard(shard_id, err.to_string()))
    }
}
