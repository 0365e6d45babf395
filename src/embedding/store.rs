//! Process-lifetime embedding store with a read-through shard cache.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::embedding::shard::{ShardData, ShardSource};
use crate::embedding::vector::EmbeddingVector;
use crate::error::Result;

/// Cached outcome of one shard load.
#[derive(Debug, Clone)]
enum ShardState {
    Loaded(Arc<AHashMap<String, EmbeddingVector>>),
    Unavailable,
}

/// Summary of the store's cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Shards loaded and cached.
    pub loaded_shards: usize,
    /// Shards that failed to load (missing or malformed).
    pub unavailable_shards: usize,
    /// Total vectors held by loaded shards.
    pub cached_vectors: usize,
}

/// Resolves pattern ids to embedding vectors through a shard cache.
///
/// The store owns the id → shard index and a cache of decoded shards. Each
/// shard is fetched from the [`ShardSource`] at most once for the life of
/// the store; a shard that fails to load is cached as unavailable and its
/// ids stay unresolved rather than failing the batch. The cache is
/// additive-only, so concurrent readers need no coordination beyond the
/// interior lock.
pub struct EmbeddingStore {
    index: AHashMap<String, String>,
    source: Arc<dyn ShardSource>,
    shards: RwLock<AHashMap<String, ShardState>>,
}

impl EmbeddingStore {
    /// Create a store from an in-memory id → shard index.
    pub fn new(index: HashMap<String, String>, source: Arc<dyn ShardSource>) -> Self {
        Self {
            index: index.into_iter().collect(),
            source,
            shards: RwLock::new(AHashMap::new()),
        }
    }

    /// Create a store by reading a JSON index file (id → shard id map).
    pub async fn from_index_file(
        path: impl AsRef<Path>,
        source: Arc<dyn ShardSource>,
    ) -> Result<Self> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        let index: HashMap<String, String> = serde_json::from_slice(&bytes)?;
        Ok(Self::new(index, source))
    }

    /// Whether an id appears in the shard index.
    ///
    /// Indexed ids can still fail to resolve if their shard is unavailable.
    pub fn is_indexed(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Resolve a single id to its vector.
    ///
    /// Returns `None` for ids missing from the index, ids whose shard is
    /// unavailable, and ids absent from their shard. Never an error.
    pub async fn get_vector(&self, id: &str) -> Option<EmbeddingVector> {
        let shard_id = self.index.get(id)?.clone();
        self.ensure_shard(&shard_id).await;

        let guard = self.shards.read();
        match guard.get(&shard_id) {
            Some(ShardState::Loaded(vectors)) => vectors.get(id).cloned(),
            _ => None,
        }
    }

    /// Resolve a batch of ids.
    ///
    /// Partial results: unresolvable ids are simply absent from the map.
    /// Distinct shards for the batch are fetched concurrently.
    pub async fn get_vectors(&self, ids: &[String]) -> HashMap<String, EmbeddingVector> {
        let mut shard_ids: Vec<&String> = ids.iter().filter_map(|id| self.index.get(id)).collect();
        shard_ids.sort_unstable();
        shard_ids.dedup();

        futures::future::join_all(shard_ids.into_iter().map(|s| self.ensure_shard(s))).await;

        let guard = self.shards.read();
        let mut resolved = HashMap::with_capacity(ids.len());
        for id in ids {
            if let Some(shard_id) = self.index.get(id)
                && let Some(ShardState::Loaded(vectors)) = guard.get(shard_id)
                && let Some(vector) = vectors.get(id)
            {
                resolved.insert(id.clone(), vector.clone());
            }
        }
        resolved
    }

    /// Snapshot of the cache state.
    pub fn stats(&self) -> StoreStats {
        let guard = self.shards.read();
        let mut stats = StoreStats::default();
        for state in guard.values() {
            match state {
                ShardState::Loaded(vectors) => {
                    stats.loaded_shards += 1;
                    stats.cached_vectors += vectors.len();
                }
                ShardState::Unavailable => stats.unavailable_shards += 1,
            }
        }
        stats
    }

    /// Load a shard into the cache unless already present.
    ///
    /// The insert re-checks under the write lock so a given key is written
    /// at most once even if two callers raced on the fetch.
    async fn ensure_shard(&self, shard_id: &str) {
        if self.shards.read().contains_key(shard_id) {
            debug!("shard '{shard_id}' already cached");
            return;
        }

        let state = match self.source.load_shard(shard_id).await {
            Ok(data) => ShardState::Loaded(Arc::new(Self::decode_shard(shard_id, data))),
            Err(err) => {
                warn!("shard '{shard_id}' unavailable: {err}");
                ShardState::Unavailable
            }
        };

        self.shards
            .write()
            .entry(shard_id.to_string())
            .or_insert(state);
    }

    fn decode_shard(shard_id: &str, data: ShardData) -> AHashMap<String, EmbeddingVector> {
        let mut vectors = AHashMap::with_capacity(data.len());
        for (id, entry) in data {
            let vector = EmbeddingVector::new(id, entry.embedding);
            if !vector.is_valid() {
                warn!(
                    "skipping invalid vector '{}' in shard '{}'",
                    vector.id, shard_id
                );
                continue;
            }
            vectors.insert(vector.id.clone(), vector);
        }
        vectors
    }
}
