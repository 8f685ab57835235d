//! Scoped access to the active work and work unit stores.
//!
//! A store entered with one of the `run_with_*` functions is visible to all
//! code polled inside the scoped future or closure, including subtrees
//! combined with `join!`. Nested scopes shadow the outer store and restore it
//! on exit, whether the inner code completes, returns an error, panics or is
//! dropped. Tasks started with `tokio::spawn` do not inherit the scope.

use std::future::Future;
use std::sync::Arc;

use crate::store::WorkStore;
use crate::unit::WorkUnitStore;

tokio::task_local! {
    static WORK_STORE: Arc<WorkStore>;
    static WORK_UNIT_STORE: Arc<WorkUnitStore>;
}

/// Run `future` with `store` as the active work store.
pub async fn run_with_work_store<F>(store: Arc<WorkStore>, future: F) -> F::Output
where
    F: Future,
{
    WORK_STORE.scope(store, future).await
}

/// Run `f` with `store` as the active work store.
pub fn run_with_work_store_sync<R>(store: Arc<WorkStore>, f: impl FnOnce() -> R) -> R {
    WORK_STORE.sync_scope(store, f)
}

/// Run `future` with `unit` as the active work unit store.
pub async fn run_with_work_unit_store<F>(unit: Arc<WorkUnitStore>, future: F) -> F::Output
where
    F: Future,
{
    WORK_UNIT_STORE.scope(unit, future).await
}

/// Run `f` with `unit` as the active work unit store.
pub fn run_with_work_unit_store_sync<R>(unit: Arc<WorkUnitStore>, f: impl FnOnce() -> R) -> R {
    WORK_UNIT_STORE.sync_scope(unit, f)
}

/// Get the active work store.
pub fn work_store() -> Option<Arc<WorkStore>> {
    WORK_STORE.try_with(Arc::clone).ok()
}

/// Get the active work unit store.
pub fn work_unit_store() -> Option<Arc<WorkUnitStore>> {
    WORK_UNIT_STORE.try_with(Arc::clone).ok()
}
