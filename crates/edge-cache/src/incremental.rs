//! Incremental cache handle consumed by revalidation.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Failed to serialize/deserialize a cache entry.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend storage error.
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// A cached render result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Rendered content.
    pub value: String,
    /// Tags this entry is purged by.
    pub tags: Vec<String>,
}

impl CacheEntry {
    /// Create a new entry without tags.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tags: Vec::new(),
        }
    }

    /// Set cache tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Check if the entry carries any of `tags`.
    pub fn matches_any(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }

    /// Encode as JSON for byte-oriented backends.
    pub fn to_json(&self) -> CacheResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(input: &str) -> CacheResult<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Tag-aware cache that revalidation requests are handed off to.
#[async_trait]
pub trait IncrementalCache: Send + Sync {
    /// Get a cached entry.
    async fn get(&self, key: &str) -> CacheResult<Option<CacheEntry>>;

    /// Store an entry.
    async fn set(&self, key: &str, entry: CacheEntry) -> CacheResult<()>;

    /// Purge every entry tagged with any of `tags`. Returns the number purged.
    async fn revalidate_tags(&self, tags: &[String]) -> CacheResult<u64>;
}

/// In-memory incremental cache (for development/testing).
#[derive(Debug, Default)]
pub struct InMemoryIncrementalCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    revalidated: RwLock<Vec<String>>,
}

impl InMemoryIncrementalCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Tags received through `revalidate_tags`, in arrival order.
    pub fn revalidated_tags(&self) -> Vec<String> {
        self.revalidated.read().clone()
    }
}

#[async_trait]
impl IncrementalCache for InMemoryIncrementalCache {
    async fn get(&self, key: &str) -> CacheResult<Option<CacheEntry>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, entry: CacheEntry) -> CacheResult<()> {
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }

    async fn revalidate_tags(&self, tags: &[String]) -> CacheResult<u64> {
        self.revalidated.write().extend(tags.iter().cloned());

        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.matches_any(tags));
        let purged = (before - entries.len()) as u64;

        tracing::debug!(tags = ?tags, purged, "revalidated cache tags");
        Ok(purged)
    }
}
