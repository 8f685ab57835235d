//! Dynamic data access tracking.

use edge_work::{WorkStore, WorkUnitKind, WorkUnitStore};

use crate::error::{RevalidateError, UnsupportedReason};

/// Marks the current render as depending on request-time data.
pub trait DynamicTracker: Send + Sync {
    /// Record that `expression` accessed dynamic data.
    ///
    /// Returns an error when dynamic access is not allowed where it happened.
    fn track_dynamic_access(
        &self,
        store: &WorkStore,
        unit: Option<&WorkUnitStore>,
        expression: &str,
    ) -> Result<(), RevalidateError>;
}

/// Tracker used by the render pipeline.
///
/// - cached scopes reject dynamic access
/// - `dynamic = "error"` routes fail with a static generation bailout
/// - prerenders drop their revalidate window to zero and bail out
/// - requests are flagged as having used dynamic data
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderDynamicTracker;

impl DynamicTracker for RenderDynamicTracker {
    fn track_dynamic_access(
        &self,
        store: &WorkStore,
        unit: Option<&WorkUnitStore>,
        expression: &str,
    ) -> Result<(), RevalidateError> {
        let cached = unit.and_then(|unit| UnsupportedReason::for_cached_scope(unit.kind()));
        if let Some(reason) = cached {
            return Err(RevalidateError::UnsupportedPhase {
                route: store.route().to_string(),
                expression: expression.to_string(),
                reason,
            });
        }

        if store.dynamic_should_error() {
            return Err(RevalidateError::StaticGenBailout {
                route: store.route().to_string(),
                expression: expression.to_string(),
            });
        }

        store.record_dynamic_usage(expression);
        tracing::debug!(route = store.route(), expression, "route marked dynamic");

        let Some(unit) = unit else {
            return Ok(());
        };

        match unit.kind() {
            WorkUnitKind::Prerender => {
                unit.set_revalidate_zero();
                unit.mark_used_dynamic();
                Err(RevalidateError::DynamicServerError {
                    route: store.route().to_string(),
                    expression: expression.to_string(),
                })
            }
            WorkUnitKind::Request => {
                unit.mark_used_dynamic();
                Ok(())
            }
            WorkUnitKind::Cache | WorkUnitKind::UnstableCache => Ok(()),
        }
    }
}
