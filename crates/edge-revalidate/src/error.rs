//! Revalidation error types.

use std::fmt;

use edge_cache::CacheError;
use edge_work::WorkUnitKind;
use thiserror::Error;

/// Guidance appended to every unsupported-phase error.
const OUTSIDE_RENDER_HINT: &str = "To ensure revalidation is performed consistently it must always happen outside of renders and cached functions.";

/// Where a revalidation was attempted that cannot accept one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// Inside a `"use cache"` function.
    UseCache,
    /// Inside a function cached with `unstable_cache(...)`.
    UnstableCache,
    /// During render.
    Render,
}

impl UnsupportedReason {
    /// Reason a unit of `kind` rejects revalidation in any phase, if it does.
    pub fn for_cached_scope(kind: WorkUnitKind) -> Option<Self> {
        match kind {
            WorkUnitKind::Cache => Some(Self::UseCache),
            WorkUnitKind::UnstableCache => Some(Self::UnstableCache),
            WorkUnitKind::Request | WorkUnitKind::Prerender => None,
        }
    }
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UseCache => write!(f, "inside a \"use cache\""),
            Self::UnstableCache => {
                write!(f, "inside a function cached with \"unstable_cache(...)\"")
            }
            Self::Render => write!(f, "during render"),
        }
    }
}

/// Errors raised by revalidation. All of them indicate API misuse and are
/// returned to the caller unchanged.
#[derive(Error, Debug)]
pub enum RevalidateError {
    /// No active work store, or it has no incremental cache.
    #[error("Invariant: static generation store missing in {expression}")]
    MissingContext { expression: String },

    /// The active work unit forbids revalidation.
    #[error("Route {route} used \"{expression}\" {reason} which is unsupported. {hint}", hint = OUTSIDE_RENDER_HINT)]
    UnsupportedPhase {
        route: String,
        expression: String,
        reason: UnsupportedReason,
    },

    /// Route is configured with `dynamic = "error"`.
    #[error("Route {route} with `dynamic = \"error\"` couldn't be rendered statically because it used {expression}")]
    StaticGenBailout { route: String, expression: String },

    /// A prerender touched dynamic data and must bail out to dynamic rendering.
    #[error("Route {route} couldn't be rendered statically because it used {expression}")]
    DynamicServerError { route: String, expression: String },

    /// Handing revalidated tags to the cache failed.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

impl RevalidateError {
    /// Check if this error comes from calling the API in the wrong place.
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            Self::MissingContext { .. } | Self::UnsupportedPhase { .. }
        )
    }
}
