//! Resource path construction.
//!
//! Pure and side-effect free: every operation resolves to exactly one path
//! here before any network call is attempted. Segments are kept apart and
//! percent-encoded when joined onto the base URL, so an id can never turn
//! into a query, a fragment or a different path.

use std::fmt;

use url::Url;

use crate::relay::{RelayError, RelayResult};
use crate::resource::{PathStrategy, ResourceKind};

/// Path of a collection or entity relative to the controller base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// `{ns}/{plural}`, or `{ns}/pools/{pool_id}/members` for members.
    pub fn collection(
        namespace: &str,
        kind: ResourceKind,
        pool_id: Option<&str>,
    ) -> RelayResult<Self> {
        let mut segments: Vec<String> = namespace
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        match kind.path_strategy() {
            PathStrategy::TopLevel => {}
            PathStrategy::PoolScoped => {
                let pool_id = pool_id.ok_or_else(|| RelayError::InvalidPath {
                    kind,
                    reason: "missing pool_id".to_string(),
                })?;
                check_segment(kind, "pool_id", pool_id)?;
                segments.push(ResourceKind::Pool.plural().to_string());
                segments.push(pool_id.to_string());
            }
        }
        segments.push(kind.plural().to_string());

        Ok(Self { segments })
    }

    /// Collection path followed by `/{id}`.
    pub fn entity(
        namespace: &str,
        kind: ResourceKind,
        pool_id: Option<&str>,
        id: &str,
    ) -> RelayResult<Self> {
        check_segment(kind, "id", id)?;
        let mut path = Self::collection(namespace, kind, pool_id)?;
        path.segments.push(id.to_string());
        Ok(path)
    }

    /// Raw (unencoded) segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Absolute URL under `base`, each segment percent-encoded.
    ///
    /// `base` must be a hierarchical URL (http/https); a trailing `/` on it
    /// is dropped before appending.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(&self.segments);
        }
        url
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

fn check_segment(kind: ResourceKind, field: &str, value: &str) -> RelayResult<()> {
    let reason = if value.is_empty() {
        format!("empty {}", field)
    } else if value == "." || value == ".." {
        format!("{} '{}' is a relative path segment", field, value)
    } else if value.contains('/') {
        format!("{} '{}' contains '/'", field, value)
    } else {
        return Ok(());
    };
    Err(RelayError::InvalidPath { kind, reason })
}
