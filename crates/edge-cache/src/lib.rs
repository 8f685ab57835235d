//! Cache tagging infrastructure for the edge revalidation platform.
//!
//! This crate provides:
//! - `normalize_path` - Turns a route path into an implicit cache tag
//! - `derived_tags` / `implicit_tags` - Tags a rendered route is stored under
//! - `IncrementalCache` - Handle to the tag-aware cache that gets purged
//! - `InMemoryIncrementalCache` - In-process backend for development/testing
//!
//! # Example
//!
//! ```ignore
//! use edge_cache::{normalize_path, NormalizedPath, SegmentType};
//! use edge_core::RevalidateConfig;
//!
//! let config = RevalidateConfig::default();
//! match normalize_path(&config, "/blog/post-1", Some(SegmentType::Page)) {
//!     NormalizedPath::Tag { tag, .. } => assert_eq!(tag, "_N_T_/blog/post-1/page"),
//!     NormalizedPath::Skipped(_) => unreachable!(),
//! }
//! ```

mod incremental;
mod normalize;
mod tags;

pub use incremental::*;
pub use normalize::*;
pub use tags::*;
