//! On-demand cache revalidation for the edge streaming SSR platform.
//!
//! This crate provides:
//! - `revalidate_tag` / `revalidate_path` - Record a revalidation from request code
//! - `Revalidator` - Same operations with explicit stores or a custom tracker
//! - `DynamicTracker` - Marks the enclosing render as dynamic
//! - `flush_revalidated_tags` - Hands recorded tags to the incremental cache
//!
//! Revalidation is only accepted from actions and route handlers. Calls made
//! during render or inside cached functions fail, since their output may be
//! replayed outside the request that triggered them.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use edge_cache::{InMemoryIncrementalCache, SegmentType};
//! use edge_revalidate::{flush_revalidated_tags, revalidate_path, revalidate_tag};
//! use edge_work::{run_with_work_store, WorkStore};
//!
//! let store = Arc::new(
//!     WorkStore::new("/blog/[slug]")
//!         .with_incremental_cache(Arc::new(InMemoryIncrementalCache::new())),
//! );
//!
//! run_with_work_store(store.clone(), async {
//!     revalidate_tag("posts")?;
//!     revalidate_path("/blog/post-1", Some(SegmentType::Page))
//! })
//! .await?;
//!
//! flush_revalidated_tags(&store).await?;
//! ```

mod dynamic;
mod error;
mod purge;
mod revalidate;

pub use dynamic::*;
pub use error::*;
pub use purge::*;
pub use revalidate::*;
