//! Known variants and how a requested variant resolves against an entry.

use crate::config::PLACEHOLDER;
use crate::models::Variants;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The reference implementation every entry carries
pub const BASELINE_REFERENCE: &str = "prisma";
/// The target implementation every entry carries
pub const BASELINE_TARGET: &str = "convex";

pub const CONVEX_HELPERS: &str = "convexHelpers";
pub const CONVEX_ENTS: &str = "convexEnts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// A variant the site knows how to label, with its optional fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub fallback: Option<&'static str>,
}

/// Only the helpers variant has a fallback (plain Convex).
pub const KNOWN_VARIANTS: &[VariantInfo] = &[
    VariantInfo {
        name: BASELINE_REFERENCE,
        label: "Prisma",
        fallback: None,
    },
    VariantInfo {
        name: BASELINE_TARGET,
        label: "Convex",
        fallback: None,
    },
    VariantInfo {
        name: CONVEX_HELPERS,
        label: "Convex + helpers",
        fallback: Some(BASELINE_TARGET),
    },
    VariantInfo {
        name: CONVEX_ENTS,
        label: "Convex Ents",
        fallback: None,
    },
];

pub fn info(name: &str) -> Option<&'static VariantInfo> {
    KNOWN_VARIANTS.iter().find(|v| v.name == name)
}

/// Display label for a variant; unknown names are shown as-is
pub fn label(name: &str) -> &str {
    match info(name) {
        Some(v) => v.label,
        None => name,
    }
}

pub fn fallback(name: &str) -> Option<&'static str> {
    info(name).and_then(|v| v.fallback)
}

/// Where a resolved text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Direct,
    Fallback,
    Placeholder,
}

/// Resolve a requested variant: the variant itself, then its fallback, then
/// the placeholder text.
pub fn resolve<'a>(variants: &'a Variants, requested: &str) -> (&'a str, Resolution) {
    if let Some(text) = variants.get(requested) {
        return (text, Resolution::Direct);
    }
    if let Some(text) = fallback(requested).and_then(|fb| variants.get(fb)) {
        return (text, Resolution::Fallback);
    }
    (PLACEHOLDER, Resolution::Placeholder)
}

/// Text-only form of [`resolve`]
pub fn resolve_text<'a>(variants: &'a Variants, requested: &str) -> &'a str {
    resolve(variants, requested).0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> Variants {
        [("prisma", "A"), ("convex", "B")].into_iter().collect()
    }

    #[test]
    fn direct_match_wins() {
        assert_eq!(resolve(&entry(), "prisma"), ("A", Resolution::Direct));
    }

    #[test]
    fn helpers_fall_back_to_convex() {
        assert_eq!(resolve(&entry(), "convexHelpers"), ("B", Resolution::Fallback));
    }

    #[test]
    fn ents_have_no_fallback() {
        assert_eq!(
            resolve(&entry(), "convexEnts"),
            (PLACEHOLDER, Resolution::Placeholder)
        );
        assert_eq!(resolve_text(&entry(), "drizzle"), PLACEHOLDER);
    }

    #[test]
    fn fallback_needs_target_present() {
        let only_prisma: Variants = [("prisma", "A")].into_iter().collect();
        assert_eq!(resolve_text(&only_prisma, "convexHelpers"), PLACEHOLDER);
    }

    #[test]
    fn labels() {
        assert_eq!(label("convexEnts"), "Convex Ents");
        assert_eq!(label("drizzle"), "drizzle");
    }
}
