mod browser;
mod clipboard;
mod common;
mod palette;

// Public API
pub use browser::{display_browser, Action, BrowserState};
pub use palette::Palette;
