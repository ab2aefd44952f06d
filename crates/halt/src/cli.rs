//! CLI argument definitions for `halt`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use halt_core::enums::{DrinkKind, Intention};
use halt_core::settings::{Language, Theme};

/// Local alcohol-tracking log: record drinks, follow goals, see trends.
#[derive(Debug, Parser)]
#[command(name = "halt", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments accepted by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Data directory (defaults to a discovered `.halt` directory).
    #[arg(long, global = true, env = "HALT_DATA")]
    pub data: Option<PathBuf>,

    /// Verbose logging to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a drink.
    Log(LogArgs),
    /// List logged entries, newest first.
    List(ListArgs),
    /// Show totals, streaks and spend.
    Stats,
    /// Show or change settings.
    Settings(SettingsArgs),
    /// Export the log as CSV.
    Export(ExportArgs),
    /// Migrate legacy data into the unified store.
    Migrate,
    /// Move an entry to the trash.
    Delete(DeleteArgs),
    /// Undo the most recent delete.
    Undo,
    /// Delete all data.
    Wipe(WipeArgs),
}

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Beverage volume in milliliters.
    #[arg(long, conflicts_with = "std", requires = "abv")]
    pub volume: Option<f64>,

    /// Alcohol by volume, percent.
    #[arg(long, conflicts_with = "std", requires = "volume")]
    pub abv: Option<f64>,

    /// Standard drinks, if already known.
    #[arg(long)]
    pub std: Option<f64>,

    /// Beverage kind: beer, wine, spirits or custom.
    #[arg(long, default_value = "custom")]
    pub kind: DrinkKind,

    /// Why: celebrate, social, taste, bored, cope or other.
    #[arg(long, default_value = "other")]
    pub intention: Intention,

    /// Craving strength, 0-10.
    #[arg(long, default_value_t = 0)]
    pub craving: u8,

    /// Comma-separated HALT triggers (hungry,angry,lonely,tired).
    #[arg(long, value_delimiter = ',')]
    pub halt: Vec<String>,

    /// Alternative action taken (or considered) instead.
    #[arg(long)]
    pub alt: Option<String>,

    /// What the drink cost.
    #[arg(long)]
    pub cost: Option<f64>,

    /// Free-form note.
    #[arg(long)]
    pub notes: Option<String>,

    /// Event time as epoch milliseconds (defaults to now).
    #[arg(long)]
    pub ts: Option<i64>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Maximum number of entries to show.
    #[arg(long, short = 'n', default_value_t = 20)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Daily goal in standard drinks.
    #[arg(long)]
    pub daily: Option<f64>,

    /// Weekly goal in standard drinks.
    #[arg(long)]
    pub weekly: Option<f64>,

    /// Monthly spending budget.
    #[arg(long)]
    pub budget: Option<f64>,

    /// UI language: en or es.
    #[arg(long)]
    pub language: Option<Language>,

    /// Theme: light, dark or system.
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Whether to show the BAC estimate.
    #[arg(long)]
    pub show_bac: Option<bool>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Omit the header row.
    #[arg(long)]
    pub no_headers: bool,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Id of the entry to delete.
    pub id: String,
}

#[derive(Debug, Args)]
pub struct WipeArgs {
    /// Confirm deleting everything.
    #[arg(long)]
    pub yes: bool,
}
