//! Work unit store: state for one nested phase of a work store.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Kind of code a work unit is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkUnitKind {
    /// Handling a live request.
    Request,
    /// Prerendering a route at build or revalidation time.
    Prerender,
    /// Body of a `"use cache"` function.
    Cache,
    /// Body of a function wrapped with `unstable_cache`.
    UnstableCache,
}

impl WorkUnitKind {
    /// Get the wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Prerender => "prerender",
            Self::Cache => "cache",
            Self::UnstableCache => "unstable-cache",
        }
    }
}

impl fmt::Display for WorkUnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase a work unit is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Running a server action or route handler.
    Action,
    /// Rendering.
    Render,
    /// Running deferred work after the response.
    After,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action => write!(f, "action"),
            Self::Render => write!(f, "render"),
            Self::After => write!(f, "after"),
        }
    }
}

/// State of one nested phase (render, cached function body, ...).
#[derive(Debug)]
pub struct WorkUnitStore {
    kind: WorkUnitKind,
    phase: Mutex<Phase>,
    revalidate: Mutex<Option<u32>>,
    used_dynamic: AtomicBool,
}

impl WorkUnitStore {
    /// Create a work unit.
    pub fn new(kind: WorkUnitKind, phase: Phase) -> Self {
        Self {
            kind,
            phase: Mutex::new(phase),
            revalidate: Mutex::new(None),
            used_dynamic: AtomicBool::new(false),
        }
    }

    /// Request unit in the action phase.
    pub fn request() -> Self {
        Self::new(WorkUnitKind::Request, Phase::Action)
    }

    /// Prerender unit in the given phase.
    pub fn prerender(phase: Phase) -> Self {
        Self::new(WorkUnitKind::Prerender, phase)
    }

    /// `"use cache"` unit.
    pub fn cache() -> Self {
        Self::new(WorkUnitKind::Cache, Phase::Render)
    }

    /// `unstable_cache` unit.
    pub fn unstable_cache() -> Self {
        Self::new(WorkUnitKind::UnstableCache, Phase::Action)
    }

    /// Set the revalidate window in seconds.
    pub fn with_revalidate(self, seconds: u32) -> Self {
        *self.revalidate.lock() = Some(seconds);
        self
    }

    /// Kind of code this unit runs.
    pub fn kind(&self) -> WorkUnitKind {
        self.kind
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        *self.phase.lock()
    }

    /// Move to another phase (e.g. action -> render).
    pub fn set_phase(&self, phase: Phase) {
        *self.phase.lock() = phase;
    }

    /// Revalidate window in seconds; `Some(0)` means never cache.
    pub fn revalidate(&self) -> Option<u32> {
        *self.revalidate.lock()
    }

    /// Force the unit's output to never be cached.
    pub fn set_revalidate_zero(&self) {
        *self.revalidate.lock() = Some(0);
    }

    /// Flag that this unit read request-time data.
    pub fn mark_used_dynamic(&self) {
        self.used_dynamic.store(true, Ordering::Release);
    }

    /// Check if this unit read request-time data.
    pub fn used_dynamic(&self) -> bool {
        self.used_dynamic.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(WorkUnitStore::request().kind(), WorkUnitKind::Request);
        assert_eq!(WorkUnitStore::request().phase(), Phase::Action);
        assert_eq!(WorkUnitStore::cache().kind(), WorkUnitKind::Cache);
        assert_eq!(
            WorkUnitStore::unstable_cache().kind(),
            WorkUnitKind::UnstableCache
        );
        assert_eq!(
            WorkUnitStore::prerender(Phase::Render).phase(),
            Phase::Render
        );
    }

    #[test]
    fn test_set_phase() {
        let unit = WorkUnitStore::request();
        unit.set_phase(Phase::Render);
        assert_eq!(unit.phase(), Phase::Render);
    }

    #[test]
    fn test_revalidate() {
        let unit = WorkUnitStore::prerender(Phase::Action).with_revalidate(60);
        assert_eq!(unit.revalidate(), Some(60));

        unit.set_revalidate_zero();
        assert_eq!(unit.revalidate(), Some(0));
    }

    #[test]
    fn test_used_dynamic() {
        let unit = WorkUnitStore::request();
        assert!(!unit.used_dynamic());
        unit.mark_used_dynamic();
        assert!(unit.used_dynamic());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(WorkUnitKind::UnstableCache.to_string(), "unstable-cache");
        assert_eq!(Phase::Render.to_string(), "render");
    }
}
