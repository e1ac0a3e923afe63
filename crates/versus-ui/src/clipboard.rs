use arboard::Clipboard;
use versus_core::{Result, VersusError};

/// Set the clipboard content as text
pub fn set_clipboard_text(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| VersusError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| VersusError::Clipboard(e.to_string()))
}
