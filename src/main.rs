use anyhow::Result;
use clap::{Parser, Subcommand};

use finfree::cli::{
    handle_audit_command, handle_budget_command, handle_expense_command, handle_goal_command,
    handle_income_command, handle_petty_command, handle_plan_command, BudgetCommands, Clock,
    ExpenseCommands, GoalCommands, IncomeCommands, PettyCommands, PlanArgs,
};
use finfree::config::{paths::FinFreePaths, settings::Settings};
use finfree::logging::init_tracing;
use finfree::storage::{init::needs_initialization, initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "finfree",
    version,
    about = "Personal finance tracking from the terminal",
    long_about = "FinFree tracks expenses, income, monthly budgets, savings goals and \
                  daily petty cash, and builds a conscious spending plan from your \
                  take-home income."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory with default settings and an empty ledger
    Init,

    /// Show current configuration and paths
    Config,

    /// Expense tracking
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Income tracking, including recurring income
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Monthly budgets
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Savings goals
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Daily petty-cash spending
    #[command(subcommand)]
    Petty(PettyCommands),

    /// Build a conscious spending plan from monthly take-home income
    Plan(PlanArgs),

    /// Show recent changes from the audit log
    Audit {
        #[arg(short, long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = FinFreePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    let mut ledger = storage.load_ledger()?;
    let clock = Clock::system();

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing FinFree at: {}", paths.base_dir().display());
            if initialize_storage(&paths)? {
                println!("Initialization complete!");
            } else {
                println!("Already initialized; existing data left untouched.");
            }
            println!();
            println!("Try 'finfree expense add 12.50 -c food -d Lunch' to record your first expense.");
        }
        Some(Commands::Config) => {
            println!("FinFree Configuration");
            println!("=====================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Ledger file:    {}", paths.ledger_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Daily limit:      {}", settings.format_money(settings.daily_limit));
            println!("  Date format:      {}", settings.date_format);
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &mut ledger, &settings, &clock, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            handle_income_command(&storage, &mut ledger, &settings, &clock, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &mut ledger, &settings, &clock, cmd)?;
        }
        Some(Commands::Goal(cmd)) => {
            handle_goal_command(&storage, &mut ledger, &settings, &clock, cmd)?;
        }
        Some(Commands::Petty(cmd)) => {
            handle_petty_command(&storage, &mut ledger, &mut settings, &clock, cmd)?;
        }
        Some(Commands::Plan(args)) => {
            handle_plan_command(&ledger, &settings, &clock, args)?;
        }
        Some(Commands::Audit { count }) => {
            handle_audit_command(&storage, count)?;
        }
        None => {
            println!("FinFree - personal finance tracking from the terminal");
            println!();
            if needs_initialization(&paths) {
                println!("Run 'finfree init' to set up your data directory.");
            }
            println!("Run 'finfree --help' for usage information.");
        }
    }

    Ok(())
}
