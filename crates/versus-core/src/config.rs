use crate::error::{Result, VersusError};
use serde::{Deserialize, Serialize};

/// Maximum line width handed to the pretty-printer.
pub const LINE_WIDTH: usize = 65;
pub const INDENT_WIDTH: usize = 2;

pub const DEFAULT_BASE_PATH: &str = "/convex-vs-prisma";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_OUT_DIR: &str = "dist";
pub const BASE_PATH_ENV: &str = "VERSUS_BASE_PATH";

pub const SITE_TITLE: &str = "Convex vs Prisma";

/// Text shown for a variant that has neither its own example nor a fallback.
pub const PLACEHOLDER: &str = "example not translated yet";

pub const PAGE_FILENAME: &str = "index.html";
pub const ENTRIES_FILENAME: &str = "entries.json";

/// Settings for the generated site and the server that hosts it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Normalized mount point: empty for the root, otherwise `/segment[/segment]`
    pub base_path: String,
    pub title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            title: SITE_TITLE.to_string(),
        }
    }
}

impl SiteConfig {
    pub fn with_base_path(base_path: &str) -> Result<Self> {
        Ok(Self {
            base_path: normalize_base_path(base_path)?,
            ..Self::default()
        })
    }

    /// Path segments of the base path, used to mount routes
    pub fn base_segments(&self) -> Vec<String> {
        self.base_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Absolute URL path for something below the base path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_path, path.trim_start_matches('/'))
    }
}

/// Normalize a hosting base path to `/a/b` form, or an empty string for the root
pub fn normalize_base_path(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return Ok(String::new());
    }

    let mut normalized = String::new();
    for segment in trimmed.trim_matches('/').split('/') {
        if segment.is_empty() {
            return Err(VersusError::InvalidConfig(format!(
                "base path '{}' contains an empty segment",
                raw
            )));
        }
        if segment == "." || segment == ".." || segment.contains(|c: char| c.is_whitespace()) {
            return Err(VersusError::InvalidConfig(format!(
                "base path '{}' contains an invalid segment '{}'",
                raw, segment
            )));
        }
        normalized.push('/');
        normalized.push_str(segment);
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_slashes() {
        assert_eq!(normalize_base_path("convex-vs-prisma/").unwrap(), "/convex-vs-prisma");
        assert_eq!(normalize_base_path("/docs/compare").unwrap(), "/docs/compare");
        assert_eq!(normalize_base_path("/").unwrap(), "");
        assert_eq!(normalize_base_path("").unwrap(), "");
    }

    #[test]
    fn rejects_empty_and_relative_segments() {
        assert!(normalize_base_path("/a//b").is_err());
        assert!(normalize_base_path("/a/../b").is_err());
        assert!(normalize_base_path("/a b").is_err());
    }

    #[test]
    fn builds_urls_below_base() {
        let config = SiteConfig::default();
        assert_eq!(config.url("api/entries"), "/convex-vs-prisma/api/entries");
        assert_eq!(config.base_segments(), vec!["convex-vs-prisma".to_string()]);

        let root = SiteConfig::with_base_path("/").unwrap();
        assert_eq!(root.url("/api/entries"), "/api/entries");
        assert!(root.base_segments().is_empty());
    }
}
