//! Slash-delimited path expressions.
//!
//! A path such as `settings/theme/color` addresses a node by descending
//! through keyed containers one segment at a time. Segments are always
//! treated as object keys, never as array indices.
//!
//! # Examples
//!
//! ```
//! use docpath::PathExpr;
//!
//! let path = PathExpr::parse("/settings/theme/");
//! assert_eq!(path.segments(), ["settings", "theme"]);
//!
//! // An empty path still has one (empty) segment.
//! assert_eq!(PathExpr::parse("").segments(), [""]);
//! ```

use crate::error::DocError;
use std::fmt;

/// How to treat a path that carries no key at all (`""`, `"/"`, `"///"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathPolicy {
    /// Accept it as a single empty-string segment, addressing the key `""`.
    #[default]
    Lenient,
    /// Reject it with [`DocError::InvalidPath`].
    Strict,
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathExpr {
    raw: String,
    segments: Vec<String>,
}

impl PathExpr {
    /// Parses a path, stripping one leading and one trailing `/`.
    ///
    /// Never fails: `""` and any path made only of `/` yield a single
    /// empty segment.
    pub fn parse(raw: &str) -> Self {
        let segments = if raw.chars().all(|c| c == '/') {
            vec![String::new()]
        } else {
            let trimmed = raw.strip_prefix('/').unwrap_or(raw);
            let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
            trimmed.split('/').map(str::to_string).collect()
        };
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    /// Parses a path under the given policy.
    pub fn parse_with(raw: &str, policy: PathPolicy) -> Result<Self, DocError> {
        let path = Self::parse(raw);
        if policy == PathPolicy::Strict && path.is_root() {
            return Err(DocError::invalid_path(raw, "path must name at least one key"));
        }
        Ok(path)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The path as the caller wrote it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if the path has no segments. Parsed paths always have at least one.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True for the degenerate single-empty-segment path.
    pub fn is_root(&self) -> bool {
        matches!(self.segments.as_slice(), [only] if only.is_empty())
    }

    /// Splits into the intermediate segments and the final key.
    pub fn split_last(&self) -> (&[String], &str) {
        match self.segments.split_last() {
            Some((last, parents)) => (parents, last.as_str()),
            None => (&[], ""),
        }
    }

    pub(crate) fn not_found(&self) -> DocError {
        DocError::not_found(self.raw.clone())
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for PathExpr {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Joins a diff prefix and a key; root keys stay unprefixed.
pub fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}/{}", prefix, key)
    }
}
