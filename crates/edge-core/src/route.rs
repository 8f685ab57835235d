//! Dynamic route detection.
//!
//! Routes use bracket-delimited parameters, mirroring file-based routing:
//!
//! ```text
//! /product/[id]            -> dynamic
//! /blog/[...slug]          -> catch-all
//! /docs/[[...path]]        -> optional catch-all
//! /about                   -> static
//! ```

/// `[id]`, `[...slug]` and `[[...slug]]` all count; empty brackets do not.
fn is_dynamic_segment(segment: &str) -> bool {
    segment
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|inner| !inner.is_empty())
}

/// Check whether a route path contains at least one dynamic segment.
///
/// Only segments following a `/` are considered, so the leading text before
/// the first slash never counts.
pub fn is_dynamic_route(path: &str) -> bool {
    path.split('/').skip(1).any(is_dynamic_segment)
}
