use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use versus_core::config::{BASE_PATH_ENV, DEFAULT_BASE_PATH, DEFAULT_OUT_DIR, DEFAULT_PORT};
use versus_core::variant::{BASELINE_REFERENCE, BASELINE_TARGET};

#[derive(Parser)]
#[command(
    author = "Gokul <@bahdotsh>",
    version = env!("CARGO_PKG_VERSION"),
    about = "versus - side-by-side code snippet comparisons",
    long_about = "versus formats a catalog of equivalent code snippets and shows them side by side, \
                  in the terminal, as a static site, or over HTTP."
)]
pub struct Versus {
    #[clap(
        long,
        global = true,
        env = BASE_PATH_ENV,
        default_value = DEFAULT_BASE_PATH,
        help = "Path the site is mounted under"
    )]
    pub base_path: String,

    #[clap(short, long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,

    #[clap(subcommand)]
    pub commands: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the comparisons in the terminal
    Browse,
    /// List sections, subsections and variants
    List,
    /// Print the comparisons for one subsection
    Show {
        #[clap(long, short, help = "Section to show")]
        section: String,

        #[clap(long, help = "Subsection to show (defaults to the first one)")]
        subsection: Option<String>,

        #[clap(long, short, default_value = BASELINE_REFERENCE, help = "Variant in the left column")]
        left: String,

        #[clap(long, short, default_value = BASELINE_TARGET, help = "Variant in the right column")]
        right: String,

        #[clap(long, short, help = "Show every entry")]
        all: bool,
    },
    /// Format every snippet and report problems
    Check,
    /// Write the static site
    Build {
        #[clap(long, short, default_value = DEFAULT_OUT_DIR, help = "Output directory")]
        out: PathBuf,
    },
    /// Serve the site and its JSON API
    Serve {
        #[clap(long, short, default_value_t = DEFAULT_PORT, help = "Port to listen on")]
        port: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show() {
        let args = Versus::parse_from([
            "versus", "show", "--section", "Reading Data", "--right", "convexHelpers", "--all",
        ]);
        match args.commands {
            Some(Commands::Show {
                section,
                subsection,
                left,
                right,
                all,
            }) => {
                assert_eq!(section, "Reading Data");
                assert_eq!(subsection, None);
                assert_eq!(left, "prisma");
                assert_eq!(right, "convexHelpers");
                assert!(all);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let args = Versus::parse_from(["versus", "serve", "--port", "8080", "--base-path", "/", "-vv"]);
        assert_eq!(args.base_path, "/");
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.commands, Some(Commands::Serve { port: 8080 })));
    }

    #[test]
    fn no_subcommand_browses() {
        let args = Versus::parse_from(["versus"]);
        assert!(args.commands.is_none());
    }
}
