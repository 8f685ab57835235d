//! Work store: state for one request or build unit.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use edge_cache::IncrementalCache;
use edge_core::RevalidateConfig;
use indexmap::IndexSet;
use parking_lot::Mutex;

/// State shared by every task working on one request/build unit.
///
/// Shared through `Arc`. Revalidated tags only ever grow (append-if-absent)
/// and `path_was_revalidated` only ever flips from false to true.
pub struct WorkStore {
    route: String,
    config: RevalidateConfig,
    incremental_cache: Option<Arc<dyn IncrementalCache>>,
    dynamic_should_error: bool,
    revalidated_tags: Mutex<IndexSet<String>>,
    path_was_revalidated: AtomicBool,
    dynamic_usage: Mutex<IndexSet<String>>,
}

impl WorkStore {
    /// Create a store for a route, without an incremental cache.
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            config: RevalidateConfig::default(),
            incremental_cache: None,
            dynamic_should_error: false,
            revalidated_tags: Mutex::new(IndexSet::new()),
            path_was_revalidated: AtomicBool::new(false),
            dynamic_usage: Mutex::new(IndexSet::new()),
        }
    }

    /// Attach the incremental cache handle.
    pub fn with_incremental_cache(mut self, cache: Arc<dyn IncrementalCache>) -> Self {
        self.incremental_cache = Some(cache);
        self
    }

    /// Set the revalidation config.
    pub fn with_config(mut self, config: RevalidateConfig) -> Self {
        self.config = config;
        self
    }

    /// Make any dynamic access on this route an error (`dynamic = "error"`).
    pub fn with_dynamic_should_error(mut self, enabled: bool) -> Self {
        self.dynamic_should_error = enabled;
        self
    }

    /// Route being processed.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Revalidation config for this unit.
    pub fn config(&self) -> &RevalidateConfig {
        &self.config
    }

    /// Incremental cache handle, if configured.
    pub fn incremental_cache(&self) -> Option<&Arc<dyn IncrementalCache>> {
        self.incremental_cache.as_ref()
    }

    /// Check whether an incremental cache is available.
    pub fn has_incremental_cache(&self) -> bool {
        self.incremental_cache.is_some()
    }

    /// Check whether dynamic access must fail for this route.
    pub fn dynamic_should_error(&self) -> bool {
        self.dynamic_should_error
    }

    /// Append a tag unless already present. Returns `true` if it was new.
    pub fn add_revalidated_tag(&self, tag: impl Into<String>) -> bool {
        self.revalidated_tags.lock().insert(tag.into())
    }

    /// Snapshot of revalidated tags in first-seen order.
    pub fn revalidated_tags(&self) -> Vec<String> {
        self.revalidated_tags.lock().iter().cloned().collect()
    }

    /// Mark that some path may need rechecking.
    pub fn mark_path_revalidated(&self) {
        self.path_was_revalidated.store(true, Ordering::Release);
    }

    /// Check whether any revalidation happened in this unit.
    pub fn path_was_revalidated(&self) -> bool {
        self.path_was_revalidated.load(Ordering::Acquire)
    }

    /// Record an expression that forced the route to render dynamically.
    ///
    /// Repeats of an already recorded expression are ignored.
    pub fn record_dynamic_usage(&self, expression: impl Into<String>) {
        self.dynamic_usage.lock().insert(expression.into());
    }

    /// Distinct expressions that forced dynamic rendering, in first-seen order.
    pub fn dynamic_usage(&self) -> Vec<String> {
        self.dynamic_usage.lock().iter().cloned().collect()
    }

    /// Check whether the route has been marked dynamic.
    pub fn is_dynamic(&self) -> bool {
        !self.dynamic_usage.lock().is_empty()
    }
}

impl fmt::Debug for WorkStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkStore")
            .field("route", &self.route)
            .field("config", &self.config)
            .field("has_incremental_cache", &self.has_incremental_cache())
            .field("dynamic_should_error", &self.dynamic_should_error)
            .field("revalidated_tags", &self.revalidated_tags())
            .field("path_was_revalidated", &self.path_was_revalidated())
            .field("dynamic_usage", &self.dynamic_usage())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge_cache::InMemoryIncrementalCache;

    #[test]
    fn test_work_store_new() {
        let store = WorkStore::new("/blog");

        assert_eq!(store.route(), "/blog");
        assert!(!store.has_incremental_cache());
        assert!(!store.dynamic_should_error());
        assert!(store.revalidated_tags().is_empty());
        assert!(!store.path_was_revalidated());
        assert!(!store.is_dynamic());
    }

    #[test]
    fn test_work_store_builder() {
        let store = WorkStore::new("/")
            .with_incremental_cache(Arc::new(InMemoryIncrementalCache::new()))
            .with_config(RevalidateConfig::default().with_implicit_tag_prefix("X"))
            .with_dynamic_should_error(true);

        assert!(store.has_incremental_cache());
        assert!(store.incremental_cache().is_some());
        assert_eq!(store.config().implicit_tag_prefix, "X");
        assert!(store.dynamic_should_error());
    }

    #[test]
    fn test_add_revalidated_tag_dedup_preserves_order() {
        let store = WorkStore::new("/");

        assert!(store.add_revalidated_tag("a"));
        assert!(store.add_revalidated_tag("b"));
        assert!(!store.add_revalidated_tag("a"));
        assert!(store.add_revalidated_tag("c"));

        assert_eq!(store.revalidated_tags(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_path_revalidated_is_monotonic() {
        let store = WorkStore::new("/");

        store.mark_path_revalidated();
        store.mark_path_revalidated();

        assert!(store.path_was_revalidated());
    }

    #[test]
    fn test_dynamic_usage() {
        let store = WorkStore::new("/");
        store.record_dynamic_usage("revalidateTag a");

        assert!(store.is_dynamic());
        assert_eq!(store.dynamic_usage(), vec!["revalidateTag a"]);
    }

    #[test]
    fn test_dynamic_usage_dedup() {
        let store = WorkStore::new("/");
        store.record_dynamic_usage("revalidateTag a");
        store.record_dynamic_usage("revalidatePath /");
        store.record_dynamic_usage("revalidateTag a");

        assert_eq!(
            store.dynamic_usage(),
            vec!["revalidateTag a", "revalidatePath /"]
        );
    }

    #[test]
    fn test_debug_lists_tags() {
        let store = WorkStore::new("/shop");
        store.add_revalidated_tag("cart");

        let debug = format!("{:?}", store);
        assert!(debug.contains("/shop"));
        assert!(debug.contains("cart"));
    }
}
