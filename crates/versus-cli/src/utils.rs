use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};
use std::io::stdout;
use tracing::debug;
use versus_core::variant::{self, Side};
use versus_core::{builtin_catalog, Catalog, RenderedPair, Result, Selection};

pub fn load_catalog() -> Result<Catalog> {
    let catalog = builtin_catalog()?;
    debug!(
        "Loaded catalog: {} entries in {} sections",
        catalog.len(),
        catalog.sections().len()
    );
    Ok(catalog)
}

/// Put the terminal in a known state before the browser takes over
pub fn reset_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(stdout(), LeaveAlternateScreen);
    println!("\x1B[2J\x1B[1;1H"); // Clear screen
}

pub fn print_pair(pair: &RenderedPair, selection: &Selection) {
    println!("== {} / {} #{} ==", pair.section, pair.subsection, pair.index + 1);
    for side in [Side::Left, Side::Right] {
        let text = match side {
            Side::Left => &pair.left,
            Side::Right => &pair.right,
        };
        println!("-- {} --", variant::label(selection.variant(side)));
        println!("{}", text);
    }
    println!();
}
