//! cascade-select - Main entry point
//!
//! Interactive picker by default, plus headless `resolve`, `validate` and
//! `init` commands.

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::{Stdout, stdout};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cascade_select::app::App;
use cascade_select::cli::{Cli, Commands, parse_level_selection};
use cascade_select::config_file::{CatalogFile, load_catalog};
use cascade_select::report;
use cascade_select::selector::MultiSelector;
use cascade_select::types::OutputFormat;

/// Initialize tracing. RUST_LOG overrides the `-v` level.
///
/// The picker owns the terminal, so without `--log-file` it logs nowhere.
fn init_logging(cli: &Cli, interactive: bool) -> Result<()> {
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        None if !interactive => {
            registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        None => {}
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let interactive = matches!(cli.command, None | Some(Commands::Tui { .. }));
    init_logging(&cli, interactive)?;
    info!("cascade-select starting up");

    match cli.command {
        None => run_tui(None),
        Some(Commands::Tui { catalog }) => run_tui(catalog.as_deref()),
        Some(Commands::Resolve {
            catalog,
            selections,
            format,
        }) => run_resolve(catalog.as_deref(), &selections, format),
        Some(Commands::Validate { catalog }) => {
            if let Err(e) = run_validate(&catalog) {
                error!("Catalog validation failed: {:#}", e);
                eprintln!("✗ Catalog validation failed: {:#}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::Init { path }) => {
            CatalogFile::demo().save_to_file(&path)?;
            println!("✓ Wrote demo catalog to {}", path.display());
            Ok(())
        }
    }
}

/// Run the interactive picker
fn run_tui(catalog_path: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let mut app = App::new(MultiSelector::new(catalog));

    debug!("Initializing terminal for TUI mode");
    let mut terminal = setup_terminal()?;
    let result = app.run(&mut terminal);

    // Always restore the terminal, even if the app failed
    restore_terminal(&mut terminal);

    result.context("Terminal picker failed")
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    if let Err(e) = execute!(stdout(), EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }
    match Terminal::new(CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(stdout(), LeaveAlternateScreen);
            Err(e).context("Failed to create terminal")
        }
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) {
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();
}

/// Apply `--select` arguments and print the resolved levels
fn run_resolve(catalog_path: Option<&Path>, selections: &[String], format: OutputFormat) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let mut selector = MultiSelector::new(catalog);

    let parsed = selections
        .iter()
        .map(|s| parse_level_selection(s))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    report::apply_selections(&mut selector, &parsed)?;

    print!("{}", report::render(&selector.snapshot(), format)?);
    Ok(())
}

/// Load and build a catalog file, printing integrity warnings
fn run_validate(path: &Path) -> Result<()> {
    info!("Validating catalog file: {:?}", path);
    let (catalog, warnings) = CatalogFile::load_from_file(path)?.build()?;

    println!(
        "✓ Catalog is valid: {} levels, {} items",
        catalog.len(),
        catalog.levels().iter().map(|l| l.items.len()).sum::<usize>()
    );
    for warning in &warnings {
        println!("  warning: {}", warning);
    }
    Ok(())
}
