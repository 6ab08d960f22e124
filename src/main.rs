use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{
    handle_expense_command, handle_report_command, ExpenseCommands, ReportArgs,
};
use expense_tracker::config::paths::DIR_ENV_VAR;
use expense_tracker::config::{Settings, TrackerPaths};
use expense_tracker::models::period;
use expense_tracker::services::ExpenseManager;
use expense_tracker::storage::CsvExpenseStore;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense tracker",
    long_about = "Record day-to-day spending, browse and search it, and see \
                  daily, weekly and monthly totals. Records are kept in \
                  data/expenses.csv below the working directory."
)]
struct Cli {
    /// Base directory holding data/expenses.csv and config.json
    #[arg(long, global = true, env = DIR_ENV_VAR, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Show (and optionally export) a daily, weekly or monthly report
    Report(ReportArgs),

    /// Show current configuration and paths
    Config {
        /// Write the current settings to config.json
        #[arg(long)]
        save: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the record file below `paths`
fn open_manager(paths: &TrackerPaths, settings: &Settings) -> ExpenseManager<CsvExpenseStore> {
    let mut manager = ExpenseManager::open(CsvExpenseStore::new(paths.expenses_file()));
    manager.set_search_date_format(settings.display_date_format.clone());
    manager
}

fn show_config(paths: &TrackerPaths, settings: &Settings, save: bool) -> Result<()> {
    println!("Expense Tracker Configuration");
    println!("=============================");
    println!("Base directory:    {}", paths.base_dir().display());
    println!("Record file:       {}", paths.expenses_file().display());
    println!("Reports directory: {}", paths.reports_dir().display());
    println!("Settings file:     {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.display_date_format);
    println!("  Categories:      {}", settings.categories.join(", "));

    if save {
        settings.save(paths)?;
        println!();
        println!("Settings written to {}", paths.settings_file().display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = match cli.dir {
        Some(dir) => TrackerPaths::with_base_dir(dir),
        None => TrackerPaths::from_env(),
    };
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            let mut manager = open_manager(&paths, &settings);
            handle_expense_command(&mut manager, &settings, cmd)?;
        }
        Some(Commands::Report(args)) => {
            let manager = open_manager(&paths, &settings);
            handle_report_command(&manager, &settings, &paths, args, period::today())?;
        }
        Some(Commands::Config { save }) => show_config(&paths, &settings, save)?,
        None => {
            println!("Expense Tracker - personal spending log");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense add <DESCRIPTION> <CATEGORY> <AMOUNT>' to record an expense.");
        }
    }

    Ok(())
}
