use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dayplan::cli::{
    handle_classify, handle_config, handle_export_command, handle_init, handle_plan_command,
    handle_rebalance, handle_spend, ExportArgs, PlanCommands,
};
use dayplan::config::{DayplanPaths, EngineConfig};
use dayplan::storage::{initialize_storage, needs_initialization, Storage};

#[derive(Parser)]
#[command(
    name = "dayplan",
    version,
    about = "Turn a monthly income into a day-by-day spending plan",
    long_about = "DayPlan splits your income into fixed costs, savings and \
                  discretionary categories, spreads each category over the days \
                  of the month, and rebalances the calendar as you spend."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create settings and an editable copy of the region/category tables
    Init,

    /// Show paths, settings and loaded tables
    Config,

    /// Show the income tier for a monthly income
    Classify {
        /// Monthly income (e.g. 5500 or $5,500.00)
        income: String,

        /// Region code (e.g. US-CA)
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Plan generation and inspection
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Record spending for a day
    Spend {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Category name
        category: String,
        /// Amount (e.g. 4.50)
        amount: String,
    },

    /// Cover over-limit days from days with room left
    Rebalance {
        /// Month (YYYY-MM, default: current)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Export a month's plan
    Export(ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let paths = DayplanPaths::new()?;

    let Some(command) = cli.command else {
        println!("DayPlan - day-by-day budgeting");
        println!();
        println!("Run 'dayplan --help' for usage information.");
        println!("Run 'dayplan init' to get started.");
        return Ok(());
    };

    let first_run = needs_initialization(&paths);
    // Settings carry the user id plans are stored under, so they must exist on disk
    let settings = initialize_storage(&paths)?;
    let config = EngineConfig::load_or_default(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match command {
        Commands::Init => handle_init(&paths, &settings, first_run),
        Commands::Config => handle_config(&paths, &storage, &settings, &config)?,
        Commands::Classify { income, region } => {
            handle_classify(&config, &settings, &income, region.as_deref())?
        }
        Commands::Plan(cmd) => handle_plan_command(&storage, &config, &settings, cmd)?,
        Commands::Spend {
            date,
            category,
            amount,
        } => handle_spend(&storage, &config, &settings, &date, &category, &amount)?,
        Commands::Rebalance { month } => {
            handle_rebalance(&storage, &config, &settings, month.as_deref())?
        }
        Commands::Export(args) => handle_export_command(&storage, &settings, args)?,
    }

    Ok(())
}
