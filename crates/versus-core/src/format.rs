//! The formatting pass: catalog entries in, pretty-printed entries out.
//!
//! Entries are formatted in parallel with rayon. Output order always follows
//! catalog order, and the first failure aborts the whole pass.

use crate::catalog::Catalog;
use crate::config::LINE_WIDTH;
use crate::error::{Result, VersusError};
use crate::models::{Entry, FormattedEntry, Variants};
use crate::printer::{PrettyPrinter, TypeScriptPrinter};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info};

/// Pretty-print one snippet with the built-in printer.
pub fn format(text: &str) -> Result<String> {
    format_with(&TypeScriptPrinter, text)
}

/// Pretty-print one snippet. Text starting with a line break is returned
/// unchanged.
pub fn format_with<P: PrettyPrinter + ?Sized>(printer: &P, text: &str) -> Result<String> {
    if text.starts_with('\n') {
        return Ok(text.to_string());
    }
    Ok(printer.format(text, LINE_WIDTH)?.trim().to_string())
}

/// Format every entry of the catalog, in catalog order
pub fn formatted_code(catalog: &Catalog) -> Result<Vec<FormattedEntry>> {
    formatted_code_with(catalog, &TypeScriptPrinter)
}

pub fn formatted_code_with<P: PrettyPrinter>(
    catalog: &Catalog,
    printer: &P,
) -> Result<Vec<FormattedEntry>> {
    let entries = catalog
        .entries()
        .par_iter()
        .map(|entry| format_entry(printer, entry))
        .collect::<Result<Vec<_>>>()?;
    info!("Formatted {} entries", entries.len());
    Ok(entries)
}

fn format_entry<P: PrettyPrinter + ?Sized>(printer: &P, entry: &Entry) -> Result<FormattedEntry> {
    let mut variants = Variants::new();
    for (name, raw) in entry.variants.iter() {
        variants.insert(name, format_variant(printer, entry, name, raw)?);
    }
    Ok(FormattedEntry {
        section: entry.section.clone(),
        subsection: entry.subsection.clone(),
        index: entry.index,
        variants,
    })
}

fn format_variant<P: PrettyPrinter + ?Sized>(
    printer: &P,
    entry: &Entry,
    variant: &str,
    raw: &str,
) -> Result<String> {
    debug!(
        "Formatting {} / {} #{} ({})",
        entry.section, entry.subsection, entry.index, variant
    );
    format_with(printer, raw).map_err(|e| VersusError::Format {
        section: entry.section.clone(),
        subsection: entry.subsection.clone(),
        index: entry.index,
        variant: variant.to_string(),
        message: e.to_string(),
    })
}

/// Format the catalog in two independent passes and run every result
/// through the printer again. Returns how many snippets were checked.
pub fn check_stability(catalog: &Catalog) -> Result<usize> {
    check_stability_with(catalog, &TypeScriptPrinter)
}

/// Fails when the passes disagree or when formatted output changes on a
/// second run. Text kept verbatim is skipped.
pub fn check_stability_with<P: PrettyPrinter>(catalog: &Catalog, printer: &P) -> Result<usize> {
    let first = formatted_code_with(catalog, printer)?;
    let second = formatted_code_with(catalog, printer)?;
    if first != second {
        return Err(VersusError::Other(
            "formatting is not deterministic".to_string(),
        ));
    }

    let mut checked = 0;
    for (entry, formatted) in catalog.entries().iter().zip(&first) {
        for (name, text) in formatted.variants.iter() {
            if text.starts_with('\n') {
                continue;
            }
            if format_variant(printer, entry, name, text)? != text {
                return Err(VersusError::Format {
                    section: entry.section.clone(),
                    subsection: entry.subsection.clone(),
                    index: entry.index,
                    variant: name.to_string(),
                    message: "output changes when formatted again".to_string(),
                });
            }
            checked += 1;
        }
    }
    info!("{} snippets format deterministically and idempotently", checked);
    Ok(checked)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    section: String,
    subsection: String,
    index: usize,
    variant: String,
    raw: String,
}

/// Memoized formatting results across repeated passes.
///
/// Lookups happen inside the parallel pass against a read-only view; new
/// results are merged once the pass has finished.
#[derive(Debug, Default)]
pub struct FormatCache {
    entries: HashMap<CacheKey, String>,
    hits: usize,
}

impl FormatCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache so far
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn format_catalog(&mut self, catalog: &Catalog) -> Result<Vec<FormattedEntry>> {
        self.format_catalog_with(catalog, &TypeScriptPrinter)
    }

    pub fn format_catalog_with<P: PrettyPrinter>(
        &mut self,
        catalog: &Catalog,
        printer: &P,
    ) -> Result<Vec<FormattedEntry>> {
        let cached = &self.entries;
        let results = catalog
            .entries()
            .par_iter()
            .map(|entry| {
                let mut variants = Variants::new();
                let mut fresh = Vec::new();
                let mut hits = 0;
                for (name, raw) in entry.variants.iter() {
                    let key = CacheKey {
                        section: entry.section.clone(),
                        subsection: entry.subsection.clone(),
                        index: entry.index,
                        variant: name.to_string(),
                        raw: raw.to_string(),
                    };
                    let text = match cached.get(&key) {
                        Some(text) => {
                            hits += 1;
                            text.clone()
                        }
                        None => {
                            let text = format_variant(printer, entry, name, raw)?;
                            fresh.push((key, text.clone()));
                            text
                        }
                    };
                    variants.insert(name, text);
                }
                let formatted = FormattedEntry {
                    section: entry.section.clone(),
                    subsection: entry.subsection.clone(),
                    index: entry.index,
                    variants,
                };
                Ok((formatted, fresh, hits))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut out = Vec::with_capacity(results.len());
        for (formatted, fresh, hits) in results {
            self.hits += hits;
            self.entries.extend(fresh);
            out.push(formatted);
        }
        debug!("Format cache: {} entries, {} hits", self.entries.len(), self.hits);
        Ok(out)
    }
}
