//! Embedding vector loading and caching.
//!
//! Vectors are precomputed by an external pipeline and grouped on disk into
//! shards keyed by source document. This module provides the shard file
//! format, the async [`ShardSource`] loading seam, and the process-lifetime
//! [`EmbeddingStore`] cache that resolves pattern ids to vectors with
//! partial coverage.

pub mod shard;
pub mod store;
pub mod vector;

pub use shard::{FilesystemShardSource, ShardData, ShardEntry, ShardSource};
pub use store::{EmbeddingStore, StoreStats};
pub use vector::EmbeddingVector;
