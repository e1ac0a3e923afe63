//! Logging initialization.
//!
//! Installs a `tracing` subscriber writing to stderr. The filter comes from
//! `RUST_LOG` when set, otherwise from the selected profile.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Progress messages for build and serve commands
    Development,
    /// Warnings only, used while the terminal UI owns the screen
    Quiet,
    /// Everything, for `-v`
    Verbose,
}

impl Profile {
    fn default_filter(self) -> &'static str {
        match self {
            Profile::Development => "versus=info,versus_core=info,versus_server=info,versus_cli=info",
            Profile::Quiet => "warn",
            Profile::Verbose => "versus=debug,versus_core=debug,versus_server=debug,versus_ui=debug,versus_cli=debug",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility. Only the first call has an effect.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init(Profile::Quiet);
        init(Profile::Verbose);
        init(Profile::Development);
    }
}
