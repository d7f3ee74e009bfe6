//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use instaplot_domain::{AxisMode, CardField};
use std::path::PathBuf;

/// InstaPlot - Lay out witness statements on a plot board.
#[derive(Debug, Parser)]
#[command(name = "instaplot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(long, global = true, env = "INSTAPLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Board database path (overrides the configured one)
    #[arg(long, global = true, env = "INSTAPLOT_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List cards in board order
    List,

    /// Create a card at a random position
    Add(AddArgs),

    /// Edit several fields of a card in one save
    Edit(EditArgs),

    /// Set one field of a card
    Set(SetArgs),

    /// Delete a card
    Delete(CardArg),

    /// Move a card, bypassing layout
    #[command(allow_negative_numbers = true)]
    Move(MoveArgs),

    /// Select a card
    Select(CardArg),

    /// Show or change the axis modes (changing them re-lays out the board)
    Axis(AxisArgs),

    /// Re-lay out every card from the current axis modes
    Organize,

    /// Replace the board with cards from a JSON file
    Import(ImportArgs),

    /// Write the board as pretty-printed JSON
    Export(ExportArgs),

    /// Feed buffer text through the debounced sync
    Buffer(BufferArgs),
}

/// A single card id (or unique prefix).
#[derive(Debug, Parser)]
pub struct CardArg {
    /// Card ID or unique prefix
    pub id: String,
}

/// Arguments for the add command.
#[derive(Debug, Parser)]
pub struct AddArgs {
    /// When the statement refers to (e.g. 2024-01-15T09:00)
    #[arg(short, long)]
    pub time: String,

    /// Who made the statement
    #[arg(short, long)]
    pub actor: String,

    /// Where it took place
    #[arg(short, long)]
    pub place: String,

    /// What was claimed
    #[arg(short = 'c', long)]
    pub claims: String,

    /// Mark the statement as a lie
    #[arg(long)]
    pub lie: bool,
}

/// Arguments for the edit command.
#[derive(Debug, Parser)]
pub struct EditArgs {
    /// Card ID or unique prefix
    pub id: String,

    /// New time
    #[arg(short, long)]
    pub time: Option<String>,

    /// New actor
    #[arg(short, long)]
    pub actor: Option<String>,

    /// New place
    #[arg(short, long)]
    pub place: Option<String>,

    /// New claims
    #[arg(short = 'c', long)]
    pub claims: Option<String>,

    /// New lie flag
    #[arg(long)]
    pub lie: Option<bool>,
}

/// Arguments for the set command.
#[derive(Debug, Parser)]
pub struct SetArgs {
    /// Card ID or unique prefix
    pub id: String,

    /// Field to change
    #[arg(value_enum)]
    pub field: FieldArg,

    /// New value (`true`/`false` for lie)
    pub value: String,
}

/// Arguments for the move command.
#[derive(Debug, Parser)]
pub struct MoveArgs {
    /// Card ID or unique prefix
    pub id: String,

    /// Horizontal coordinate (or offset with --by)
    pub x: f64,

    /// Vertical coordinate (or offset with --by)
    pub y: f64,

    /// Treat x and y as a drag offset from the current position
    #[arg(long)]
    pub by: bool,
}

/// Arguments for the axis command.
#[derive(Debug, Parser)]
pub struct AxisArgs {
    /// Horizontal axis mode
    #[arg(short, long, value_enum)]
    pub x: Option<AxisArg>,

    /// Vertical axis mode
    #[arg(short, long, value_enum)]
    pub y: Option<AxisArg>,
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// JSON file holding an array of cards
    pub file: PathBuf,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the buffer command.
#[derive(Debug, Parser)]
pub struct BufferArgs {
    /// Successive buffer states, applied as rapid edits (`-` reads stdin)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Quiet interval in milliseconds (defaults to the configured one)
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Pause between successive states, in milliseconds
    #[arg(long, default_value = "0")]
    pub pace_ms: u64,
}

/// Axis mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AxisArg {
    /// Bucket by place
    Place,
    /// Bucket by actor
    Actor,
    /// Spread along the timeline
    Time,
}

/// Editable card field argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FieldArg {
    /// Timestamp text
    Time,
    /// Actor label
    Actor,
    /// Place label
    Place,
    /// Claim text
    Claims,
    /// Lie flag
    Lie,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<AxisArg> for AxisMode {
    fn from(axis: AxisArg) -> Self {
        match axis {
            AxisArg::Place => AxisMode::Place,
            AxisArg::Actor => AxisMode::Actor,
            AxisArg::Time => AxisMode::Time,
        }
    }
}

impl FieldArg {
    /// Text field this argument names; `None` for the lie flag
    pub fn text_field(self) -> Option<CardField> {
        match self {
            FieldArg::Time => Some(CardField::Time),
            FieldArg::Actor => Some(CardField::Actor),
            FieldArg::Place => Some(CardField::Place),
            FieldArg::Claims => Some(CardField::Claims),
            FieldArg::Lie => None,
        }
    }
}
