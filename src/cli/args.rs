use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "habitlog")]
#[command(about = "Track habits from an interactive console menu")]
#[command(long_about = "habitlog - a console habit tracker

Define habits with a unit of measure, log how much you did, and look back
at your entries and totals. Everything is stored in one local SQLite file.

Run without a subcommand to open the interactive menu:
  habitlog                         Open the menu
  habitlog --database ./h.db       Use a specific database file
  habitlog -o json                 Show views as JSON

Configuration is read from ~/.habitlog/config.yaml (or $HABITLOG_HOME).")]
#[command(version)]
pub struct Cli {
    /// Output format for the view screens
    ///
    /// Defaults to the `general.default_output` configuration value.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Database file to use instead of the configured one
    #[arg(long, value_name = "PATH", env = "HABITLOG_DB", global = true)]
    pub database: Option<PathBuf>,

    /// Configuration file to read
    #[arg(long, value_name = "PATH", env = "HABITLOG_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for view results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive menu (default)
    Menu,

    /// Check that every habit has a log table and every log table a habit
    Check,

    /// Generate shell completions
    ///
    /// Example: habitlog completions bash > ~/.bash_completion.d/habitlog
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
