use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use fintally::cli::entries::{ListFilter, NewEntry};
use fintally::core::log::init_logging;
use fintally::core::{EntryType, Period};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show totals and per-period breakdown of income, expenses and savings
    Dashboard {
        /// daily, monthly or yearly
        #[arg(short, long)]
        period: Option<Period>,
    },
    /// Compare income, expenses and savings over the most recent periods
    Chart {
        /// daily, monthly or yearly
        #[arg(short, long)]
        period: Option<Period>,
    },
    /// List entries, optionally filtered by type or date range
    List {
        #[arg(short = 't', long = "type")]
        entry_type: Option<EntryType>,
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Add an entry, or update it if the id already exists
    Add {
        #[arg(long)]
        id: String,
        #[arg(short, long)]
        amount: f64,
        #[arg(long)]
        category: String,
        /// income, expense or saving
        #[arg(short = 't', long = "type")]
        entry_type: EntryType,
        /// Entry date (YYYY-MM-DD), defaults to now
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete an entry by id
    Delete { id: String },
}

impl From<Commands> for fintally::AppCommand {
    fn from(cmd: Commands) -> fintally::AppCommand {
        match cmd {
            Commands::Dashboard { period } => fintally::AppCommand::Dashboard { period },
            Commands::Chart { period } => fintally::AppCommand::Chart { period },
            Commands::List {
                entry_type,
                from,
                to,
            } => fintally::AppCommand::List(ListFilter {
                entry_type,
                from,
                to,
            }),
            Commands::Add {
                id,
                amount,
                category,
                entry_type,
                date,
                description,
            } => fintally::AppCommand::Add(NewEntry {
                id,
                amount,
                category,
                entry_type,
                date,
                description,
            }),
            Commands::Delete { id } => fintally::AppCommand::Delete { id },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fintally::cli::setup::setup(),
        Some(cmd) => fintally::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
