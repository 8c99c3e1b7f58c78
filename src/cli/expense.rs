//! Expense CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_list, format_expense_stats, format_top_categories};
use crate::error::{FinFreeError, FinFreeResult};
use crate::models::ExpenseCategory;
use crate::reports::{top_categories, ExpenseStats};
use crate::services::{ExpenseFilter, ExpenseService};
use crate::state::Ledger;
use crate::storage::Storage;

use super::{parse_amount, parse_date_or_today, parse_month_or_current, Clock};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category (food, transportation, shopping, entertainment, bills,
        /// healthcare, education, other)
        #[arg(short, long)]
        category: String,
        #[arg(short, long)]
        description: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (the short form shown by `list` works)
        id: String,
    },

    /// Show the categories with the most spending
    Top {
        /// Month (YYYY-MM); all time when omitted
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Show expense totals by month and category
    Stats,
}

fn parse_category(input: &str) -> FinFreeResult<ExpenseCategory> {
    input
        .parse::<ExpenseCategory>()
        .map_err(|e| FinFreeError::Validation(e.to_string()))
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    ledger: &mut Ledger,
    settings: &Settings,
    clock: &Clock,
    cmd: ExpenseCommands,
) -> FinFreeResult<()> {
    let mut service = ExpenseService::new(storage, ledger);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            description,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let category = parse_category(&category)?;
            let date = parse_date_or_today(date.as_deref(), clock)?;

            let expense = service.add(amount, category, &description, date, clock.now)?;
            println!(
                "Added expense {}: {} for {} ({})",
                expense.id,
                settings.format_money(expense.amount),
                expense.description,
                expense.category.label()
            );
        }

        ExpenseCommands::List {
            month,
            category,
            limit,
        } => {
            let mut filter = ExpenseFilter::new().limit(limit);
            if let Some(m) = month {
                filter = filter.month(parse_month_or_current(Some(m.as_str()), clock)?);
            }
            if let Some(c) = category {
                filter = filter.category(parse_category(&c)?);
            }

            println!("{}", format_expense_list(&service.list(&filter), settings));
        }

        ExpenseCommands::Delete { id } => {
            let removed = service.delete(&id)?;
            println!(
                "Deleted expense {}: {} for {}",
                removed.id,
                settings.format_money(removed.amount),
                removed.description
            );
        }

        ExpenseCommands::Top { month, limit } => {
            let month = match month {
                Some(m) => Some(parse_month_or_current(Some(m.as_str()), clock)?),
                None => None,
            };
            let shares = top_categories(service.records(), month, limit);
            println!("{}", format_top_categories(&shares, settings));
        }

        ExpenseCommands::Stats => {
            let stats = ExpenseStats::compute(service.records(), clock.today);
            print!("{}", format_expense_stats(&stats, settings));
        }
    }

    Ok(())
}
