use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};

use habitlog::cli::args::{Cli, Commands};
use habitlog::cli::commands::generate_completions;
use habitlog::cli::{Prompter, Shell};
use habitlog::config::{ColorSetting, Config};
use habitlog::habits::HabitStore;
use habitlog::logging;
use habitlog::output::format_integrity;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {e:#}", "error".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        print!("{}", generate_completions(shell)?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    logging::init(&config.logging.level, cli.verbose);
    apply_color(&cli, config.general.color);

    let format = cli.output.unwrap_or(config.general.default_output);
    let store = match cli.database.as_deref().or_else(|| config.database_path()) {
        Some(path) => open_store_at(path)?,
        None => {
            info!("opening habit database in the default location");
            HabitStore::new().context("failed to open the default habit database")?
        }
    };
    let integrity = store.check_integrity()?;

    if matches!(cli.command, Some(Commands::Check)) {
        println!("{}", format_integrity(&integrity, format)?);
        return Ok(());
    }

    let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    debug!(interactive, "starting menu");

    let stdin = std::io::stdin();
    let prompter = Prompter::new(stdin.lock(), std::io::stdout())
        .with_fuzzy_picker(interactive && config.general.fuzzy_picker);
    let mut shell = Shell::new(&store, prompter, format)
        .with_clear_screen(interactive && config.general.clear_screen);
    shell.run()?;

    Ok(())
}

fn apply_color(cli: &Cli, setting: ColorSetting) {
    if cli.no_color {
        colored::control::set_override(false);
        return;
    }
    match setting {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }
}

/// Open the store at an explicit path, creating its directory first.
fn open_store_at(path: &Path) -> Result<HabitStore> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    info!(path = %path.display(), "opening habit database");
    HabitStore::open_at(path).with_context(|| format!("failed to open {}", path.display()))
}
