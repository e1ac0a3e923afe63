//! Static site generation and HTTP hosting for versus.

pub mod api;
pub mod server;
pub mod site;

// Re-export common items for convenience
pub use server::{routes, start_server};
pub use site::{render_page, write_site, Site};
