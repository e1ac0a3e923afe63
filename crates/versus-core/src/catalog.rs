//! The snippet catalog: a flat, ordered list of entries tagged with their
//! section and subsection.
//!
//! Entries are grouped section-major, then by subsection, then by position,
//! regardless of the order in which they were added to the builder. That
//! traversal order is what the formatter and the selector rely on.

use crate::error::{Result, VersusError};
use crate::models::{Entry, Variants};
use crate::variant::{BASELINE_REFERENCE, BASELINE_TARGET};
use serde::Serialize;

/// Raw nested form used for static catalog definitions
pub type RawEntry = &'static [(&'static str, &'static str)];
pub type RawSubsection = (&'static str, &'static [RawEntry]);
pub type RawSection = (&'static str, &'static [RawSubsection]);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubsectionOutline {
    pub name: String,
    pub entries: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionOutline {
    pub name: String,
    pub subsections: Vec<SubsectionOutline>,
}

/// Immutable catalog of comparison entries
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Entry>,
    outline: Vec<SectionOutline>,
}

impl Catalog {
    /// Build a catalog from its static nested definition
    pub fn from_static(sections: &[RawSection]) -> Result<Self> {
        let mut builder = CatalogBuilder::new();
        for (section, subsections) in sections {
            for (subsection, entries) in subsections.iter() {
                for pairs in entries.iter() {
                    builder.add_entry(section, subsection, pairs.iter().copied())?;
                }
            }
        }
        builder.build()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn outline(&self) -> &[SectionOutline] {
        &self.outline
    }

    pub fn sections(&self) -> Vec<&str> {
        self.outline.iter().map(|s| s.name.as_str()).collect()
    }

    /// Subsections of a section in catalog order, or `None` for an unknown section
    pub fn subsections(&self, section: &str) -> Option<Vec<&str>> {
        self.find_section(section)
            .map(|s| s.subsections.iter().map(|sub| sub.name.as_str()).collect())
    }

    pub fn first_section(&self) -> &str {
        // build() rejects empty catalogs
        &self.outline[0].name
    }

    pub fn first_subsection(&self, section: &str) -> Option<&str> {
        self.find_section(section)
            .and_then(|s| s.subsections.first())
            .map(|sub| sub.name.as_str())
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.find_section(section).is_some()
    }

    pub fn has_subsection(&self, section: &str, subsection: &str) -> bool {
        self.find_section(section)
            .map(|s| s.subsections.iter().any(|sub| sub.name == subsection))
            .unwrap_or(false)
    }

    pub fn entries_in<'a>(
        &'a self,
        section: &'a str,
        subsection: &'a str,
    ) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.section == section && e.subsection == subsection)
    }

    /// Distinct variant names in first-seen order
    pub fn variants(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            for name in entry.variants.names() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    fn find_section(&self, section: &str) -> Option<&SectionOutline> {
        self.outline.iter().find(|s| s.name == section)
    }
}

/// Collects entries into ordered sections and subsections
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    sections: Vec<(String, Vec<(String, Vec<Variants>)>)>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to its subsection, creating section and subsection on first use
    pub fn add_entry<K, V, I>(&mut self, section: &str, subsection: &str, pairs: I) -> Result<()>
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut variants = Variants::new();
        for (name, text) in pairs {
            let name = name.into();
            if !variants.insert(name.clone(), text) {
                return Err(VersusError::InvalidCatalog(format!(
                    "duplicate variant '{}' in {} / {}",
                    name, section, subsection
                )));
            }
        }

        let section_idx = match self.sections.iter().position(|(name, _)| name == section) {
            Some(idx) => idx,
            None => {
                self.sections.push((section.to_string(), Vec::new()));
                self.sections.len() - 1
            }
        };
        let subsections = &mut self.sections[section_idx].1;
        match subsections.iter_mut().find(|(name, _)| name == subsection) {
            Some((_, entries)) => entries.push(variants),
            None => subsections.push((subsection.to_string(), vec![variants])),
        }
        Ok(())
    }

    /// Validate and flatten into a [`Catalog`]
    pub fn build(self) -> Result<Catalog> {
        if self.sections.is_empty() {
            return Err(VersusError::InvalidCatalog(
                "catalog has no sections".to_string(),
            ));
        }

        let mut entries = Vec::new();
        let mut outline = Vec::with_capacity(self.sections.len());

        for (section, subsections) in self.sections {
            let mut section_outline = SectionOutline {
                name: section.clone(),
                subsections: Vec::with_capacity(subsections.len()),
            };

            for (subsection, variant_sets) in subsections {
                let count = variant_sets.len();
                for (index, variants) in variant_sets.into_iter().enumerate() {
                    for baseline in [BASELINE_REFERENCE, BASELINE_TARGET] {
                        if !variants.contains(baseline) {
                            return Err(VersusError::InvalidCatalog(format!(
                                "{} / {} #{} is missing the '{}' variant",
                                section, subsection, index, baseline
                            )));
                        }
                    }
                    entries.push(Entry {
                        section: section.clone(),
                        subsection: subsection.clone(),
                        index,
                        variants,
                    });
                }
                section_outline.subsections.push(SubsectionOutline {
                    name: subsection,
                    entries: count,
                });
            }

            outline.push(section_outline);
        }

        Ok(Catalog { entries, outline })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(prisma: &str, convex: &str) -> Vec<(&'static str, String)> {
        vec![("prisma", prisma.to_string()), ("convex", convex.to_string())]
    }

    #[test]
    fn groups_entries_section_major() {
        let mut builder = CatalogBuilder::new();
        builder.add_entry("A", "a1", pair("1", "1")).unwrap();
        builder.add_entry("B", "b1", pair("2", "2")).unwrap();
        builder.add_entry("A", "a2", pair("3", "3")).unwrap();
        builder.add_entry("A", "a1", pair("4", "4")).unwrap();
        let catalog = builder.build().unwrap();

        let order: Vec<(&str, &str, usize)> = catalog
            .entries()
            .iter()
            .map(|e| (e.section.as_str(), e.subsection.as_str(), e.index))
            .collect();
        assert_eq!(
            order,
            vec![("A", "a1", 0), ("A", "a1", 1), ("A", "a2", 0), ("B", "b1", 0)]
        );
        assert_eq!(catalog.sections(), vec!["A", "B"]);
        assert_eq!(catalog.subsections("A").unwrap(), vec!["a1", "a2"]);
        assert_eq!(catalog.outline()[0].subsections[0].entries, 2);
        assert_eq!(catalog.first_subsection("B"), Some("b1"));
        assert!(catalog.subsections("C").is_none());
    }

    #[test]
    fn rejects_duplicate_variant_keys() {
        let mut builder = CatalogBuilder::new();
        let err = builder
            .add_entry("A", "a1", vec![("prisma", "x"), ("prisma", "y")])
            .unwrap_err();
        assert!(matches!(err, VersusError::InvalidCatalog(_)));
    }

    #[test]
    fn rejects_missing_baseline() {
        let mut builder = CatalogBuilder::new();
        builder.add_entry("A", "a1", vec![("prisma", "x")]).unwrap();
        assert!(matches!(
            builder.build(),
            Err(VersusError::InvalidCatalog(msg)) if msg.contains("convex")
        ));
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(CatalogBuilder::new().build().is_err());
    }

    #[test]
    fn variants_in_first_seen_order() {
        let mut builder = CatalogBuilder::new();
        builder
            .add_entry("A", "a1", vec![("prisma", "1"), ("convex", "2")])
            .unwrap();
        builder
            .add_entry("A", "a1", vec![("prisma", "1"), ("convexEnts", "3"), ("convex", "2")])
            .unwrap();
        let catalog = builder.build().unwrap();
        assert_eq!(catalog.variants(), vec!["prisma", "convex", "convexEnts"]);
    }

    #[test]
    fn from_static_definition() {
        static RAW: &[RawSection] = &[(
            "Reading Data",
            &[("Find Records", &[&[("prisma", "a"), ("convex", "b")]])],
        )];
        let catalog = Catalog::from_static(RAW).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.first_section(), "Reading Data");
        assert!(catalog.has_subsection("Reading Data", "Find Records"));
        assert_eq!(catalog.entries_in("Reading Data", "Find Records").count(), 1);
    }
}
