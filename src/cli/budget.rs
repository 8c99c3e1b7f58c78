//! Budget CLI commands
//!
//! Setting monthly budgets, the budget-vs-actual view with insights,
//! suggestions for a new month and the JSON budget report.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::display::{
    format_budget_comparison, format_budget_insights, format_prefill, format_suggestions,
};
use crate::error::{FinFreeError, FinFreeResult};
use crate::models::{ExpenseCategory, Money, MonthKey};
use crate::reports::{compute_budget_comparison, compute_insights, BudgetReport};
use crate::services::BudgetService;
use crate::state::Ledger;
use crate::storage::Storage;

use super::{parse_amount, parse_month_or_current, Clock};

/// One amount flag per expense category
#[derive(Args, Debug, Default)]
pub struct CategoryAmounts {
    #[arg(long)]
    pub food: Option<String>,
    #[arg(long)]
    pub transportation: Option<String>,
    #[arg(long)]
    pub shopping: Option<String>,
    #[arg(long)]
    pub entertainment: Option<String>,
    #[arg(long)]
    pub bills: Option<String>,
    #[arg(long)]
    pub healthcare: Option<String>,
    #[arg(long)]
    pub education: Option<String>,
    #[arg(long)]
    pub other: Option<String>,
}

impl CategoryAmounts {
    fn raw(&self, category: ExpenseCategory) -> Option<&String> {
        match category {
            ExpenseCategory::Food => self.food.as_ref(),
            ExpenseCategory::Transportation => self.transportation.as_ref(),
            ExpenseCategory::Shopping => self.shopping.as_ref(),
            ExpenseCategory::Entertainment => self.entertainment.as_ref(),
            ExpenseCategory::Bills => self.bills.as_ref(),
            ExpenseCategory::Healthcare => self.healthcare.as_ref(),
            ExpenseCategory::Education => self.education.as_ref(),
            ExpenseCategory::Other => self.other.as_ref(),
        }
    }

    /// Parsed amounts for the categories that were given
    fn parse(&self) -> FinFreeResult<Vec<(ExpenseCategory, Money)>> {
        ExpenseCategory::ALL
            .iter()
            .filter_map(|&c| self.raw(c).map(|raw| (c, raw)))
            .map(|(c, raw)| parse_amount(raw).map(|amount| (c, amount)))
            .collect()
    }
}

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the budget for a month, replacing any existing one
    Set {
        /// Month (YYYY-MM)
        month: String,
        #[command(flatten)]
        amounts: CategoryAmounts,
    },

    /// Show budget vs. actual spending with insights
    Show {
        /// Month (YYYY-MM), defaults to the current month
        month: Option<String>,
    },

    /// Suggest amounts for a month from recent spending
    Suggest {
        /// Month (YYYY-MM), defaults to the current month
        month: Option<String>,
    },

    /// Write the budget report as JSON
    Report {
        /// Month (YYYY-MM), defaults to the current month
        month: Option<String>,
        /// Output file or directory; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn no_budget(month: MonthKey) {
    println!("No budget configured for {}.", month.long_name());
    println!("Set one with 'finfree budget set {} --food <amount> ...'", month);
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    ledger: &mut Ledger,
    settings: &Settings,
    clock: &Clock,
    cmd: BudgetCommands,
) -> FinFreeResult<()> {
    match cmd {
        BudgetCommands::Set { month, amounts } => {
            let month = parse_month_or_current(Some(month.as_str()), clock)?;
            let amounts = amounts.parse()?;

            let replacing = ledger.budget_for(month).is_some();
            let budget = BudgetService::new(storage, ledger).set(month, amounts, clock.now)?;

            println!(
                "{} budget for {}: {} total",
                if replacing { "Updated" } else { "Created" },
                month.long_name(),
                settings.format_money(budget.total())
            );
        }

        BudgetCommands::Show { month } => {
            let month = parse_month_or_current(month.as_deref(), clock)?;
            let Some(comparison) =
                compute_budget_comparison(&ledger.expenses, &ledger.budgets, month)
            else {
                no_budget(month);
                return Ok(());
            };
            let insights = compute_insights(&comparison);

            println!("Budget: {}", month.long_name());
            println!("{}", "=".repeat(72));
            println!("{}", format_budget_comparison(&comparison, settings));
            let text = format_budget_insights(&insights);
            if !text.is_empty() {
                println!("{}", text);
            }
        }

        BudgetCommands::Suggest { month } => {
            let month = parse_month_or_current(month.as_deref(), clock)?;
            let service = BudgetService::new(storage, ledger);

            if let Some(previous) = service.prefill(month) {
                println!(
                    "Budget from {} (reuse it with 'finfree budget set {}'):",
                    month.prev().long_name(),
                    month
                );
                print!("{}", format_prefill(&previous, settings));
            } else {
                println!("Suggested amounts for {} (average + 10%):", month.long_name());
                println!("{}", format_suggestions(&service.suggest(month), settings));
            }
        }

        BudgetCommands::Report { month, output } => {
            let month = parse_month_or_current(month.as_deref(), clock)?;
            let Some(report) = BudgetReport::generate(ledger, month, clock.now) else {
                no_budget(month);
                return Ok(());
            };
            let json = report.to_json_pretty()?;

            match output {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(report.default_file_name())
                    } else {
                        path
                    };
                    std::fs::write(&path, json).map_err(|e| {
                        FinFreeError::Io(format!("Failed to write {}: {}", path.display(), e))
                    })?;
                    println!("Wrote budget report to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
