pub mod cli;
pub mod commands;
pub mod utils;

use clap::Parser;
use cli::Versus;
use commands::handle_command;
use std::process;

/// Run the versus CLI application
pub fn run_main() {
    let args = Versus::parse();
    let result = handle_command(args);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
