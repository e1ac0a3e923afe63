//! Viewer selection state and its transitions.
//!
//! A [`Selection`] is plain data. Every transition takes the current value and
//! returns the next one; nothing here knows about a UI toolkit.

use crate::catalog::Catalog;
use crate::error::{Result, VersusError};
use crate::models::FormattedEntry;
use crate::variant::{self, Resolution, Side, BASELINE_REFERENCE, BASELINE_TARGET};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub section: String,
    pub subsection: String,
    pub left: String,
    pub right: String,
    pub show_all: bool,
}

impl Selection {
    /// First section, its first subsection, Prisma on the left and Convex on the right
    pub fn initial(catalog: &Catalog) -> Self {
        let section = catalog.first_section().to_string();
        let subsection = catalog
            .first_subsection(&section)
            .unwrap_or_default()
            .to_string();
        Self {
            section,
            subsection,
            left: BASELINE_REFERENCE.to_string(),
            right: BASELINE_TARGET.to_string(),
            show_all: false,
        }
    }

    /// Switch section and jump to its first subsection
    pub fn select_section(&self, catalog: &Catalog, section: &str) -> Result<Self> {
        let subsection = catalog
            .first_subsection(section)
            .ok_or_else(|| VersusError::UnknownSection(section.to_string()))?;
        Ok(Self {
            section: section.to_string(),
            subsection: subsection.to_string(),
            ..self.clone()
        })
    }

    pub fn select_subsection(&self, catalog: &Catalog, section: &str, subsection: &str) -> Result<Self> {
        if !catalog.has_section(section) {
            return Err(VersusError::UnknownSection(section.to_string()));
        }
        if !catalog.has_subsection(section, subsection) {
            return Err(VersusError::UnknownSubsection {
                section: section.to_string(),
                subsection: subsection.to_string(),
            });
        }
        Ok(Self {
            section: section.to_string(),
            subsection: subsection.to_string(),
            ..self.clone()
        })
    }

    /// Show `name` on one side. Both sides may show the same variant.
    pub fn select_variant(&self, catalog: &Catalog, side: Side, name: &str) -> Result<Self> {
        if !is_selectable(catalog, name) {
            return Err(VersusError::UnknownVariant(name.to_string()));
        }
        let mut next = self.clone();
        match side {
            Side::Left => next.left = name.to_string(),
            Side::Right => next.right = name.to_string(),
        }
        Ok(next)
    }

    pub fn toggle_show_all(&self) -> Self {
        Self {
            show_all: !self.show_all,
            ..self.clone()
        }
    }

    /// Move to the next or previous section, wrapping around
    pub fn cycle_section(&self, catalog: &Catalog, forward: bool) -> Self {
        let sections = catalog.sections();
        match step(&sections, &self.section, forward) {
            Some(section) => self.select_section(catalog, section).unwrap_or_else(|_| self.clone()),
            None => self.clone(),
        }
    }

    /// Move to the next or previous subsection of the current section, wrapping around
    pub fn cycle_subsection(&self, catalog: &Catalog, forward: bool) -> Self {
        let subsections = catalog.subsections(&self.section).unwrap_or_default();
        match step(&subsections, &self.subsection, forward) {
            Some(subsection) => Self {
                subsection: subsection.to_string(),
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    /// Step one side through the variants the catalog uses
    pub fn cycle_variant(&self, catalog: &Catalog, side: Side, forward: bool) -> Self {
        let names = catalog.variants();
        let current = self.variant(side);
        match step(&names, current, forward) {
            Some(name) => {
                let mut next = self.clone();
                match side {
                    Side::Left => next.left = name.to_string(),
                    Side::Right => next.right = name.to_string(),
                }
                next
            }
            None => self.clone(),
        }
    }

    pub fn variant(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn is_visible(&self, section: &str, subsection: &str) -> bool {
        self.show_all || (self.section == section && self.subsection == subsection)
    }
}

fn is_selectable(catalog: &Catalog, name: &str) -> bool {
    variant::info(name).is_some() || catalog.variants().contains(&name)
}

fn step<'a>(items: &[&'a str], current: &str, forward: bool) -> Option<&'a str> {
    let len = items.len();
    if len == 0 {
        return None;
    }
    let next = match items.iter().position(|item| *item == current) {
        Some(pos) if forward => (pos + 1) % len,
        Some(pos) => (pos + len - 1) % len,
        None => 0,
    };
    Some(items[next])
}

/// One formatted entry as the viewer shows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPair {
    pub section: String,
    pub subsection: String,
    pub index: usize,
    pub left: String,
    pub right: String,
    pub left_resolution: Resolution,
    pub right_resolution: Resolution,
    pub visible: bool,
}

/// Resolve both sides of every entry for `selection`. Hidden entries are
/// kept with `visible` unset.
pub fn project(entries: &[FormattedEntry], selection: &Selection) -> Vec<RenderedPair> {
    entries
        .iter()
        .map(|entry| {
            let (left, left_resolution) = variant::resolve(&entry.variants, &selection.left);
            let (right, right_resolution) = variant::resolve(&entry.variants, &selection.right);
            RenderedPair {
                section: entry.section.clone(),
                subsection: entry.subsection.clone(),
                index: entry.index,
                left: left.to_string(),
                right: right.to_string(),
                left_resolution,
                right_resolution,
                visible: selection.is_visible(&entry.section, &entry.subsection),
            }
        })
        .collect()
}

/// Entries shown for `selection`, in catalog order
pub fn visible<'a>(
    entries: &'a [FormattedEntry],
    selection: &'a Selection,
) -> impl Iterator<Item = &'a FormattedEntry> + 'a {
    entries
        .iter()
        .filter(move |entry| selection.is_visible(&entry.section, &entry.subsection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;
    use crate::config::PLACEHOLDER;
    use crate::models::Variants;

    fn catalog() -> Catalog {
        let mut builder = CatalogBuilder::new();
        for (section, subsection) in [("A", "a1"), ("A", "a2"), ("B", "b1"), ("B", "b2")] {
            builder
                .add_entry(section, subsection, vec![("prisma", "p"), ("convex", "c")])
                .unwrap();
        }
        builder.build().unwrap()
    }

    fn formatted(section: &str, subsection: &str) -> FormattedEntry {
        FormattedEntry {
            section: section.to_string(),
            subsection: subsection.to_string(),
            index: 0,
            variants: [("prisma", "A"), ("convex", "B")].into_iter().collect::<Variants>(),
        }
    }

    #[test]
    fn initial_selection() {
        let selection = Selection::initial(&catalog());
        assert_eq!(selection.section, "A");
        assert_eq!(selection.subsection, "a1");
        assert_eq!((selection.left.as_str(), selection.right.as_str()), ("prisma", "convex"));
        assert!(!selection.show_all);
    }

    #[test]
    fn selecting_a_section_resets_the_subsection() {
        let catalog = catalog();
        let selection = Selection::initial(&catalog)
            .select_subsection(&catalog, "A", "a2")
            .unwrap()
            .select_section(&catalog, "B")
            .unwrap();
        assert_eq!((selection.section.as_str(), selection.subsection.as_str()), ("B", "b1"));
    }

    #[test]
    fn rejects_unknown_names() {
        let catalog = catalog();
        let selection = Selection::initial(&catalog);
        assert!(matches!(
            selection.select_section(&catalog, "C"),
            Err(VersusError::UnknownSection(_))
        ));
        assert!(matches!(
            selection.select_subsection(&catalog, "A", "b1"),
            Err(VersusError::UnknownSubsection { .. })
        ));
        assert!(matches!(
            selection.select_variant(&catalog, Side::Left, "drizzle"),
            Err(VersusError::UnknownVariant(_))
        ));
    }

    #[test]
    fn sides_are_independent() {
        let catalog = catalog();
        let selection = Selection::initial(&catalog)
            .select_variant(&catalog, Side::Left, "convex")
            .unwrap();
        assert_eq!(selection.left, "convex");
        assert_eq!(selection.right, "convex");

        let selection = selection
            .select_variant(&catalog, Side::Right, "convexEnts")
            .unwrap();
        assert_eq!(selection.variant(Side::Right), "convexEnts");
        assert_eq!(selection.variant(Side::Left), "convex");
    }

    #[test]
    fn cycling_wraps_around() {
        let catalog = catalog();
        let selection = Selection::initial(&catalog);
        let back = selection.cycle_section(&catalog, false);
        assert_eq!((back.section.as_str(), back.subsection.as_str()), ("B", "b1"));
        let sub = selection.cycle_subsection(&catalog, true).cycle_subsection(&catalog, true);
        assert_eq!(sub.subsection, "a1");
        let right = selection.cycle_variant(&catalog, Side::Right, true);
        assert_eq!(right.right, "prisma");
    }

    #[test]
    fn show_all_overrides_filter() {
        let catalog = catalog();
        let entries = vec![formatted("A", "a1"), formatted("B", "b1")];
        let selection = Selection::initial(&catalog);

        let shown: Vec<bool> = project(&entries, &selection).iter().map(|p| p.visible).collect();
        assert_eq!(shown, vec![true, false]);
        assert_eq!(visible(&entries, &selection).count(), 1);

        let all = selection.toggle_show_all();
        assert!(project(&entries, &all).iter().all(|p| p.visible));
        assert!(!all.toggle_show_all().show_all);
    }

    #[test]
    fn projection_resolves_variants() {
        let catalog = catalog();
        let selection = Selection::initial(&catalog)
            .select_variant(&catalog, Side::Left, "convexHelpers")
            .unwrap()
            .select_variant(&catalog, Side::Right, "convexEnts")
            .unwrap();
        let pairs = project(&[formatted("A", "a1")], &selection);
        assert_eq!(pairs[0].left, "B");
        assert_eq!(pairs[0].left_resolution, Resolution::Fallback);
        assert_eq!(pairs[0].right, PLACEHOLDER);
        assert_eq!(pairs[0].right_resolution, Resolution::Placeholder);
    }

    #[test]
    fn round_trips_through_json() {
        let selection = Selection::initial(&catalog()).toggle_show_all();
        let json = serde_json::to_string(&selection).unwrap();
        let back: Selection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selection);
    }
}
