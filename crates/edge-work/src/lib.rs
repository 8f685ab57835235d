//! Request-scoped stores for the edge revalidation platform.
//!
//! This crate provides:
//! - `WorkStore` - Per request/build unit state (route, cache handle, revalidated tags)
//! - `WorkUnitStore` - Per phase state nested inside a work store
//! - Scope functions that make both stores visible to code running beneath them
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use edge_work::{run_with_work_store, work_store, WorkStore};
//!
//! let store = Arc::new(WorkStore::new("/blog/[slug]"));
//! run_with_work_store(store, async {
//!     assert!(work_store().is_some());
//! })
//! .await;
//! ```

mod scope;
mod store;
mod unit;

pub use scope::*;
pub use store::*;
pub use unit::*;
