//! CLI argument definitions for the campaign editor.

use std::path::PathBuf;

use campaign_cli::commands::CampaignField;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "campaign",
    version,
    about = "Campaign Studio - Set up research campaigns from the terminal",
    long_about = "Create and edit Campaign Studio campaign files.\n\n\
                  `campaign describe` edits the description with autosave: the draft\n\
                  is written back once input has been quiet for the autosave delay."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include campaign text in logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file to use instead of the one in the config directory.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new campaign file.
    New(NewArgs),

    /// Print a campaign.
    Show(FileArg),

    /// Set a text field.
    Set(SetArgs),

    /// Set or clear the campaign dates.
    Dates(DatesArgs),

    /// Manage invited participants.
    #[command(subcommand)]
    Participants(ParticipantsCommand),

    /// Copy a starter prompt into an agent instruction field.
    Prompt(PromptArgs),

    /// Edit the description interactively with autosave.
    ///
    /// Each input line extends the draft. Directives: `:save`, `:dismiss`,
    /// `:cancel`, `:clear` and `:wait <ms>`. End of input flushes the draft.
    Describe(FileArg),
}

#[derive(Parser)]
pub struct FileArg {
    /// Campaign file.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,
}

#[derive(Parser)]
pub struct NewArgs {
    /// Campaign file to create.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Start blank instead of with the sample description and participants.
    #[arg(long = "empty")]
    pub empty: bool,

    /// Overwrite an existing file.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Parser)]
pub struct SetArgs {
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    #[arg(value_enum)]
    pub field: CampaignField,

    pub value: String,
}

#[derive(Parser)]
pub struct DatesArgs {
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// First day of the campaign (YYYY-MM-DD).
    #[arg(long = "start", conflicts_with = "clear_start")]
    pub start: Option<NaiveDate>,

    /// Last day of the campaign (YYYY-MM-DD).
    #[arg(long = "end", conflicts_with = "clear_end")]
    pub end: Option<NaiveDate>,

    #[arg(long = "clear-start")]
    pub clear_start: bool,

    #[arg(long = "clear-end")]
    pub clear_end: bool,
}

#[derive(Subcommand)]
pub enum ParticipantsCommand {
    /// Invite one or more participants.
    Add {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Remove a participant by its position in `campaign show` (1-based).
    Remove {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        position: usize,
    },

    /// List suggested names that are not invited yet.
    Suggest {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        #[arg(default_value = "")]
        query: String,
    },
}

#[derive(Parser)]
pub struct PromptArgs {
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    #[arg(value_enum)]
    pub kind: PromptKindArg,

    /// Starter prompt number (1-based).
    pub position: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PromptKindArg {
    Interview,
    Outcome,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
