//! Route path to implicit tag normalization.

use std::fmt;
use std::str::FromStr;

use edge_core::{is_dynamic_route, RevalidateConfig};
use serde::{Deserialize, Serialize};

/// Which segment of a route a path revalidation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    /// The layout at this path and everything nested below it.
    Layout,
    /// Only the page at this path.
    Page,
}

impl SegmentType {
    /// Get the tag suffix for this segment type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Page => "page",
        }
    }
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`SegmentType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown segment type '{0}', expected 'layout' or 'page'")]
pub struct ParseSegmentTypeError(pub String);

impl FromStr for SegmentType {
    type Err = ParseSegmentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "layout" => Ok(Self::Layout),
            "page" => Ok(Self::Page),
            other => Err(ParseSegmentTypeError(other.to_string())),
        }
    }
}

/// Non-fatal condition found while normalizing a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathWarning {
    /// Path is longer than the soft tag limit; revalidation is skipped.
    ExceededMaxLength { path: String, max_length: usize },
    /// Dynamic path without a segment type; has no effect by default.
    MissingSegmentType { path: String },
}

impl fmt::Display for PathWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExceededMaxLength { path, max_length } => write!(
                f,
                "revalidatePath received \"{}\" which exceeded max length of {}",
                path, max_length
            ),
            Self::MissingSegmentType { path } => write!(
                f,
                "a dynamic page path \"{}\" was passed to \"revalidatePath\", but the \"type\" parameter is missing. This has no effect by default",
                path
            ),
        }
    }
}

/// Outcome of [`normalize_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedPath {
    /// Path was too long; the caller must skip revalidation.
    Skipped(PathWarning),
    /// Implicit tag to revalidate, with an optional warning.
    Tag {
        tag: String,
        warning: Option<PathWarning>,
    },
}

impl NormalizedPath {
    /// Get the tag, if one was produced.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Tag { tag, .. } => Some(tag.as_str()),
            Self::Skipped(_) => None,
        }
    }

    /// Get the warning emitted during normalization, if any.
    pub fn warning(&self) -> Option<&PathWarning> {
        match self {
            Self::Skipped(warning) => Some(warning),
            Self::Tag { warning, .. } => warning.as_ref(),
        }
    }
}

/// Map a route path and optional segment type to its implicit cache tag.
///
/// Path length is measured in UTF-16 code units, so characters outside the
/// Basic Multilingual Plane count twice. Warnings are logged and also
/// returned in the result.
pub fn normalize_path(
    config: &RevalidateConfig,
    original_path: &str,
    segment_type: Option<SegmentType>,
) -> NormalizedPath {
    if original_path.encode_utf16().count() > config.soft_tag_max_length {
        let warning = PathWarning::ExceededMaxLength {
            path: original_path.to_string(),
            max_length: config.soft_tag_max_length,
        };
        tracing::warn!(
            path = original_path,
            max_length = config.soft_tag_max_length,
            "{}",
            warning
        );
        return NormalizedPath::Skipped(warning);
    }

    let mut tag = config.implicit_tag(original_path);
    let mut warning = None;

    if let Some(segment_type) = segment_type {
        if !tag.ends_with('/') {
            tag.push('/');
        }
        tag.push_str(segment_type.as_str());
    } else if is_dynamic_route(original_path) {
        let missing = PathWarning::MissingSegmentType {
            path: original_path.to_string(),
        };
        tracing::warn!(path = original_path, "{}", missing);
        warning = Some(missing);
    }

    NormalizedPath::Tag { tag, warning }
}
