//! Recording tag and path revalidations against the active work store.

use edge_cache::{normalize_path, NormalizedPath, SegmentType};
use edge_core::RevalidateConfig;
use edge_work::{work_store, work_unit_store, Phase, WorkStore, WorkUnitStore};

use crate::dynamic::{DynamicTracker, RenderDynamicTracker};
use crate::error::{RevalidateError, UnsupportedReason};

/// Result type for revalidation.
pub type RevalidateResult<T> = Result<T, RevalidateError>;

/// Records revalidation requests.
///
/// The `*_in` methods take the stores explicitly; the others look up the
/// stores active in the current scope.
#[derive(Debug, Clone, Default)]
pub struct Revalidator<T = RenderDynamicTracker> {
    tracker: T,
}

impl Revalidator<RenderDynamicTracker> {
    /// Create a revalidator using the render pipeline's dynamic tracker.
    pub fn new() -> Self {
        Self {
            tracker: RenderDynamicTracker,
        }
    }
}

impl<T: DynamicTracker> Revalidator<T> {
    /// Create a revalidator with a custom dynamic tracker.
    pub fn with_tracker(tracker: T) -> Self {
        Self { tracker }
    }

    /// Get the dynamic tracker.
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Revalidate a cache tag in the active scope.
    pub fn revalidate_tag(&self, tag: &str) -> RevalidateResult<()> {
        let store = work_store();
        let unit = work_unit_store();
        self.revalidate_tag_in(store.as_deref(), unit.as_deref(), tag)
    }

    /// Revalidate a route path in the active scope.
    pub fn revalidate_path(
        &self,
        original_path: &str,
        segment_type: Option<SegmentType>,
    ) -> RevalidateResult<()> {
        let store = work_store();
        let unit = work_unit_store();
        self.revalidate_path_in(store.as_deref(), unit.as_deref(), original_path, segment_type)
    }

    /// Revalidate a cache tag as-is, without any prefixing.
    pub fn revalidate_tag_in(
        &self,
        store: Option<&WorkStore>,
        unit: Option<&WorkUnitStore>,
        tag: &str,
    ) -> RevalidateResult<()> {
        self.record(store, unit, tag, &format!("revalidateTag {}", tag))
    }

    /// Revalidate the implicit tag of a route path.
    ///
    /// Paths over the soft length limit are skipped with a warning and no
    /// error. Without a store the default config decides the limit.
    pub fn revalidate_path_in(
        &self,
        store: Option<&WorkStore>,
        unit: Option<&WorkUnitStore>,
        original_path: &str,
        segment_type: Option<SegmentType>,
    ) -> RevalidateResult<()> {
        let default_config;
        let config = match store {
            Some(store) => store.config(),
            None => {
                default_config = RevalidateConfig::default();
                &default_config
            }
        };

        let tag = match normalize_path(config, original_path, segment_type) {
            NormalizedPath::Skipped(_) => return Ok(()),
            NormalizedPath::Tag { tag, .. } => tag,
        };

        self.record(store, unit, &tag, &format!("revalidatePath {}", original_path))
    }

    /// Validate where the request happens, mark the render dynamic, and add
    /// `tag` to the store's revalidated tags.
    pub fn record(
        &self,
        store: Option<&WorkStore>,
        unit: Option<&WorkUnitStore>,
        tag: &str,
        expression: &str,
    ) -> RevalidateResult<()> {
        let store = match store {
            Some(store) if store.has_incremental_cache() => store,
            _ => {
                return Err(RevalidateError::MissingContext {
                    expression: expression.to_string(),
                })
            }
        };

        if let Some(unit) = unit {
            if let Some(reason) = unsupported_reason(unit) {
                return Err(RevalidateError::UnsupportedPhase {
                    route: store.route().to_string(),
                    expression: expression.to_string(),
                    reason,
                });
            }
        }

        self.tracker.track_dynamic_access(store, unit, expression)?;

        let added = store.add_revalidated_tag(tag);
        tracing::debug!(
            route = store.route(),
            tag,
            expression,
            new = added,
            "recorded revalidation"
        );

        // Set for every revalidation, not only ones matching a cached path.
        store.mark_path_revalidated();
        Ok(())
    }
}

fn unsupported_reason(unit: &WorkUnitStore) -> Option<UnsupportedReason> {
    UnsupportedReason::for_cached_scope(unit.kind())
        .or_else(|| (unit.phase() == Phase::Render).then_some(UnsupportedReason::Render))
}

/// Revalidate a cache tag from the active request scope.
///
/// The tag is recorded verbatim. Fails when called outside a request with an
/// incremental cache, or from inside rendering or cached code.
pub fn revalidate_tag(tag: &str) -> RevalidateResult<()> {
    Revalidator::new().revalidate_tag(tag)
}

/// Revalidate a route path from the active request scope.
///
/// `segment_type` selects the page or the layout at that path. Dynamic paths
/// (`/blog/[slug]`) without a segment type are accepted with a warning.
pub fn revalidate_path(
    original_path: &str,
    segment_type: Option<SegmentType>,
) -> RevalidateResult<()> {
    Revalidator::new().revalidate_path(original_path, segment_type)
}
