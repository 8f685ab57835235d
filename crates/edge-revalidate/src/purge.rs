//! Handing revalidated tags to the incremental cache.

use edge_work::WorkStore;

use crate::error::RevalidateError;

/// Forward the store's revalidated tags to its incremental cache.
///
/// Call once the work unit has completed. Returns the number of purged
/// entries; a store with no tags (or no cache) purges nothing.
pub async fn flush_revalidated_tags(store: &WorkStore) -> Result<u64, RevalidateError> {
    let tags = store.revalidated_tags();
    if tags.is_empty() {
        return Ok(0);
    }

    let Some(cache) = store.incremental_cache() else {
        return Ok(0);
    };

    let purged = cache.revalidate_tags(&tags).await?;
    tracing::info!(
        route = store.route(),
        tags = tags.len(),
        purged,
        "flushed revalidated tags"
    );
    Ok(purged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use edge_cache::{
        CacheEntry, CacheError, CacheResult, InMemoryIncrementalCache, IncrementalCache,
    };

    struct FailingCache;

    #[async_trait]
    impl IncrementalCache for FailingCache {
        async fn get(&self, _key: &str) -> CacheResult<Option<CacheEntry>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _entry: CacheEntry) -> CacheResult<()> {
            Ok(())
        }

        async fn revalidate_tags(&self, _tags: &[String]) -> CacheResult<u64> {
            Err(CacheError::Storage(anyhow::anyhow!("kv store unavailable")))
        }
    }

    #[tokio::test]
    async fn test_flush_forwards_tags() {
        let cache = Arc::new(InMemoryIncrementalCache::new());
        cache
            .set("/blog/post-1", CacheEntry::new("post").with_tags(["posts"]))
            .await
            .unwrap();
        let store = WorkStore::new("/blog").with_incremental_cache(cache.clone());
        store.add_revalidated_tag("posts");
        store.add_revalidated_tag("users");

        let purged = flush_revalidated_tags(&store).await.unwrap();

        assert_eq!(purged, 1);
        assert_eq!(cache.revalidated_tags(), vec!["posts", "users"]);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_flush_without_tags() {
        let cache = Arc::new(InMemoryIncrementalCache::new());
        let store = WorkStore::new("/").with_incremental_cache(cache.clone());

        assert_eq!(flush_revalidated_tags(&store).await.unwrap(), 0);
        assert!(cache.revalidated_tags().is_empty());
    }

    #[tokio::test]
    async fn test_flush_cache_error() {
        let store = WorkStore::new("/").with_incremental_cache(Arc::new(FailingCache));
        store.add_revalidated_tag("posts");

        let err = flush_revalidated_tags(&store).await.unwrap_err();

        assert!(matches!(err, RevalidateError::Cache(CacheError::Storage(_))));
    }
}
