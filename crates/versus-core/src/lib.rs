pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod highlight;
pub mod logging;
pub mod models;
pub mod printer;
pub mod selection;
pub mod snippets;
pub mod theme;
pub mod variant;

// Re-export common items for convenience
pub use catalog::{Catalog, CatalogBuilder, SectionOutline, SubsectionOutline};
pub use config::{SiteConfig, DEFAULT_BASE_PATH, LINE_WIDTH, PLACEHOLDER};
pub use error::{Result, VersusError};
pub use format::{check_stability, format, formatted_code, FormatCache};
pub use highlight::{highlight, Span, TokenClass};
pub use models::{Entry, FormattedEntry, Variants};
pub use printer::{PrettyPrinter, TypeScriptPrinter};
pub use selection::{project, RenderedPair, Selection};
pub use snippets::builtin_catalog;
pub use theme::{ColorScheme, ThemePreference, ThemeSubscription};
pub use variant::{resolve, Resolution, Side, KNOWN_VARIANTS};
