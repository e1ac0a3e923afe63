use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Variant name to source text, in insertion order. Names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variants(Vec<(String, String)>);

impl Variants {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a variant. Returns false, leaving the map untouched, if the name is taken.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push((name, text.into()));
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, text)| text.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(key, _)| key == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, text)| (key.as_str(), text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variants {
    /// Later duplicates are dropped; use [`Variants::insert`] to detect them.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut variants = Variants::new();
        for (name, text) in iter {
            variants.insert(name, text);
        }
        variants
    }
}

impl Serialize for Variants {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, text) in &self.0 {
            map.serialize_entry(name, text)?;
        }
        map.end()
    }
}

/// One comparable unit of the catalog, tagged with its position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub section: String,
    pub subsection: String,
    /// Position within its subsection
    pub index: usize,
    pub variants: Variants,
}

/// Pretty-printed counterpart of an [`Entry`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedEntry {
    pub section: String,
    pub subsection: String,
    pub index: usize,
    pub variants: Variants,
}

impl FormattedEntry {
    pub fn is_in(&self, section: &str, subsection: &str) -> bool {
        self.section == section && self.subsection == subsection
    }
}
