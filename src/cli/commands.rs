use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "timetrack",
    about = concat!("timetrack v", env!("CARGO_PKG_VERSION"), " - how long since?"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Data file (default: [data] path from the config, then ~/.timetrack.json)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<String>,

    /// Config file (default: $XDG_CONFIG_HOME/timetrack/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,

    /// Log file for the interactive mode (default: $XDG_STATE_HOME/timetrack/timetrack.log)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List items with the time elapsed since each
    #[command(visible_alias = "ls")]
    List(ListArgs),
    /// Add an item
    #[command(visible_aliases = ["new", "create"])]
    Add(AddArgs),
    /// Remove every item matching a pattern
    #[command(visible_alias = "remove")]
    Rm(RmArgs),
    /// Reset the time of every item matching a pattern to now
    Restart(RestartArgs),
    /// Remove all items
    Reset,
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only show items whose name matches this regular expression
    pub pattern: Option<String>,
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Item name
    pub name: String,
    /// Start time in local time, "YYYY-MM-DD HH:MM:SS" (default: now)
    #[arg(long)]
    pub date: Option<String>,
    /// Add at the top of the list
    #[arg(long, conflicts_with = "bottom")]
    pub top: bool,
    /// Add at the bottom of the list
    #[arg(long)]
    pub bottom: bool,
}

#[derive(Args)]
pub struct RmArgs {
    /// Regular expression matched against item names
    pub pattern: String,
}

#[derive(Args)]
pub struct RestartArgs {
    /// Regular expression matched against item names
    pub pattern: String,
}
