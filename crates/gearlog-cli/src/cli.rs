use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "gear")]
#[command(about = "Track PPE inventory and inspections from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new piece of equipment
    #[command(alias = "new")]
    Add {
        /// Serial number printed on the item (also the QR code payload)
        serial: String,
        /// Human-readable name
        name: String,
        /// PPE category
        #[arg(long, value_enum, default_value_t = KindArg::Other)]
        kind: KindArg,
        /// Days between mandatory inspections
        #[arg(long, default_value = "90")]
        interval_days: u32,
    },
    /// List equipment
    List {
        /// Number of items to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one item by serial or ID, with recent inspection history
    #[command(alias = "scan")]
    Show {
        /// Serial number (QR payload) or equipment ID
        equipment: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Capture an inspection (queued locally, synced when possible)
    Inspect {
        /// Serial number (QR payload) or equipment ID
        equipment: String,
        /// Checkpoint result as name=pass or name=fail (repeatable)
        #[arg(short = 'c', long = "checkpoint", value_name = "NAME=RESULT")]
        checkpoints: Vec<String>,
        /// Free-form inspection notes
        #[arg(long)]
        notes: Option<String>,
        /// Inspector name or initials
        #[arg(long)]
        inspector: Option<String>,
        /// Queue only; skip the immediate submission attempt
        #[arg(long)]
        offline: bool,
    },
    /// Show or clear the offline inspection queue
    Queue {
        #[command(subcommand)]
        action: Option<QueueAction>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Submit all queued inspections now
    Sync,
    /// Pull the equipment catalog from the backend
    Refresh,
    /// Update an item's operational status
    Status {
        /// Serial number (QR payload) or equipment ID
        equipment: String,
        /// New status
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Export a compliance report
    Report {
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum QueueAction {
    /// List queued inspections (default)
    List,
    /// Drop one queued inspection without submitting it
    Clear {
        /// Queue entry ID
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Harness,
    Helmet,
    Lanyard,
    Gloves,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Maintenance,
    Retired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
    Elvish,
}
