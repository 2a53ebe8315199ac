use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for ptoccupancy
#[derive(Parser)]
#[command(
    name = "ptoccupancy",
    version = env!("CARGO_PKG_VERSION"),
    about = "Rebuild scheduled test sessions from the portal audit log and report hourly room occupancy",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Report keys missing from the configuration file")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Import a saved log page (or TSV rows) as a new snapshot
    Import {
        #[arg(long, value_name = "FILE", conflicts_with = "tsv", required_unless_present = "tsv")]
        html: Option<String>,

        #[arg(long, value_name = "FILE")]
        tsv: Option<String>,

        #[arg(long, default_value = "", help = "Free-text note stored with the snapshot")]
        note: String,
    },

    /// List imported snapshots
    Snapshots,

    /// Reconcile a snapshot into the list of currently scheduled sessions
    Sessions {
        #[arg(long, help = "Snapshot id (default: latest)")]
        snapshot: Option<i64>,

        #[arg(long, value_name = "FILE", help = "Write a `Scheduled Date,Location` CSV checkpoint")]
        export: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Aggregate sessions into a date x hour x location occupancy grid
    Occupancy {
        #[arg(
            long,
            value_name = "RANGE",
            help = "YYYY, YYYY-MM, YYYY-MM-DD or start:end of the same shape (default: span of the sessions)"
        )]
        range: Option<String>,

        #[arg(long, value_name = "CODES", help = "Comma-separated canonical location codes")]
        locations: Option<String>,

        #[arg(
            long,
            conflicts_with = "locations",
            help = "Use the distinct session locations instead of canonical codes"
        )]
        observed: bool,

        #[arg(long, conflicts_with = "from_csv", help = "Snapshot id (default: latest)")]
        snapshot: Option<i64>,

        #[arg(long = "from-csv", value_name = "FILE", help = "Read sessions from a checkpoint CSV")]
        from_csv: Option<String>,

        #[arg(long, value_enum)]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
