use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use fintrack::cli::{
    handle_audit_command, handle_auth_command, handle_budget_command, handle_dashboard_command,
    handle_expense_command, handle_export_command, handle_history_command, handle_income_command,
    handle_profile_command, handle_tax_command,
};
use fintrack::config::{paths::FintrackPaths, settings::Settings};
use fintrack::models::Money;
use fintrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based personal finance tracker",
    long_about = "fintrack records income and expenses, tracks spending against \
                  per-category budgets, keeps a searchable transaction history and \
                  estimates the tax you owe, all from the command line."
)]
struct Cli {
    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, global = true, env = "FINTRACK_LOG", default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income management commands
    #[command(subcommand)]
    Income(fintrack::cli::IncomeCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(fintrack::cli::ExpenseCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(fintrack::cli::BudgetCommands),

    /// Show totals, monthly trend and spending by category
    #[command(alias = "dash")]
    Dashboard(fintrack::cli::DashboardArgs),

    /// Transaction history: search, filter, sort and export
    #[command(subcommand)]
    History(fintrack::cli::HistoryCommands),

    /// Tax estimation commands
    #[command(subcommand)]
    Tax(fintrack::cli::TaxCommands),

    /// Sign in, sign up and sign out
    #[command(subcommand)]
    Auth(fintrack::cli::AuthCommands),

    /// Profile management for the signed-in user
    #[command(subcommand)]
    Profile(fintrack::cli::ProfileCommands),

    /// Full data export
    #[command(subcommand)]
    Export(fintrack::cli::ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,

        /// Include before/after values
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level);
    debug!("Log level set to {}", cli.log_level.to_string().to_lowercase());

    // Initialize paths and settings
    let paths = FintrackPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Income(cmd)) => handle_income_command(&storage, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Dashboard(args)) => handle_dashboard_command(&storage, &settings, args)?,
        Some(Commands::History(cmd)) => handle_history_command(&storage, cmd)?,
        Some(Commands::Tax(cmd)) => handle_tax_command(&storage, &settings, cmd)?,
        Some(Commands::Auth(cmd)) => handle_auth_command(&storage, cmd)?,
        Some(Commands::Profile(cmd)) => handle_profile_command(&storage, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Audit { count, verbose }) => {
            handle_audit_command(&storage, count, verbose)?
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Trailing months:      {}", settings.trailing_months);
            println!("  Month window:         {:?}", settings.month_window);
            println!("  Budget spent:         {:?}", settings.budget_spent);
            println!("  Default tax rate:     {}%", settings.default_tax_rate);
            println!(
                "  Default deductions:   {}",
                Money::from_cents(settings.default_deductions_cents)
            );
        }
        None => {
            println!("fintrack - Terminal-based personal finance tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    storage.close()?;
    Ok(())
}

fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        // RUST_LOG wins when set.
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "{}={},{}={}",
            env!("CARGO_CRATE_NAME"),
            level,
            env!("CARGO_BIN_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
