use crate::cli::{Commands, Versus};
use crate::utils::{load_catalog, print_pair, reset_terminal};
use std::path::Path;
use tracing::info;
use versus_core::logging::{self, Profile};
use versus_core::selection::visible;
use versus_core::variant::Side;
use versus_core::{
    check_stability, formatted_code, project, Result, Selection, SiteConfig, ThemePreference,
};
use versus_server::{start_server, write_site, Site};
use versus_ui::display_browser;

pub fn handle_command(args: Versus) -> Result<()> {
    let profile = match (&args.commands, args.verbose) {
        (_, v) if v > 0 => Profile::Verbose,
        (None, _) | (Some(Commands::Browse), _) => Profile::Quiet,
        _ => Profile::Development,
    };
    logging::init(profile);

    let config = SiteConfig::with_base_path(&args.base_path)?;
    match args.commands {
        Some(command) => handle_subcommand(command, config),
        None => handle_browse(), // Default: browse when no command provided
    }
}

fn handle_subcommand(command: Commands, config: SiteConfig) -> Result<()> {
    match command {
        Commands::Browse => handle_browse(),
        Commands::List => handle_list(),
        Commands::Show {
            section,
            subsection,
            left,
            right,
            all,
        } => handle_show(&section, subsection.as_deref(), &left, &right, all),
        Commands::Check => handle_check(),
        Commands::Build { out } => handle_build(&out, config),
        Commands::Serve { port } => handle_serve(port, config),
    }
}

fn handle_browse() -> Result<()> {
    let catalog = load_catalog()?;
    let entries = formatted_code(&catalog)?;
    let theme = ThemePreference::detect();

    reset_terminal();
    display_browser(&entries, &catalog, &theme)
}

fn handle_list() -> Result<()> {
    let catalog = load_catalog()?;
    for section in catalog.outline() {
        println!("{}", section.name);
        for subsection in &section.subsections {
            let noun = if subsection.entries == 1 { "entry" } else { "entries" };
            println!("  {} ({} {})", subsection.name, subsection.entries, noun);
        }
    }
    println!();
    println!("Variants: {}", catalog.variants().join(", "));
    Ok(())
}

fn handle_show(
    section: &str,
    subsection: Option<&str>,
    left: &str,
    right: &str,
    all: bool,
) -> Result<()> {
    let catalog = load_catalog()?;
    let mut selection = Selection::initial(&catalog).select_section(&catalog, section)?;
    if let Some(subsection) = subsection {
        selection = selection.select_subsection(&catalog, section, subsection)?;
    }
    selection = selection
        .select_variant(&catalog, Side::Left, left)?
        .select_variant(&catalog, Side::Right, right)?;
    if all {
        selection = selection.toggle_show_all();
    }

    let entries = formatted_code(&catalog)?;
    let shown = visible(&entries, &selection).count();
    for pair in project(&entries, &selection).iter().filter(|pair| pair.visible) {
        print_pair(pair, &selection);
    }
    info!("Showed {} of {} entries", shown, entries.len());
    Ok(())
}

/// Format the catalog twice without caching and reformat every result; both
/// must reproduce the same text.
fn handle_check() -> Result<()> {
    let catalog = load_catalog()?;
    let checked = check_stability(&catalog)?;
    println!("✅ {} entries, {} snippets formatted", catalog.len(), checked);
    Ok(())
}

fn handle_build(out: &Path, config: SiteConfig) -> Result<()> {
    let site = Site::build(config, load_catalog()?)?;
    write_site(out, &site)?;
    println!("Site written to {}", out.display());
    Ok(())
}

fn handle_serve(port: u16, config: SiteConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let catalog = load_catalog()?;
    runtime.block_on(async {
        info!("Starting server on port {}", port);
        start_server(port, config, catalog).await
    })
}
