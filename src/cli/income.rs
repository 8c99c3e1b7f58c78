//! Income CLI commands

use clap::Subcommand;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::display::{format_income_list, format_income_summary};
use crate::error::{FinFreeError, FinFreeResult};
use crate::models::IncomeSource;
use crate::reports::income::{income_trends, IncomeStats};
use crate::reports::IncomeReport;
use crate::services::{IncomeService, RecurrencePlan};
use crate::state::Ledger;
use crate::storage::Storage;

use super::{parse_amount, parse_date_or_today, parse_month_or_current, Clock};

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record income
    Add {
        /// Amount (e.g., "3200" or "3200.00")
        amount: String,
        /// Source (salary, freelance, business, investment, rental, other)
        #[arg(short, long)]
        source: String,
        #[arg(short, long)]
        description: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Make this recurring: weekly, bi-weekly, monthly, quarterly (or 1-4)
        #[arg(short, long)]
        frequency: Option<String>,
        /// Number of future entries to create (1-12)
        #[arg(long, requires = "frequency")]
        months: Option<u32>,
    },

    /// List income, newest first
    List {
        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete income; a recurring entry takes its generated entries with it
    Delete {
        /// Income ID (the short form shown by `list` works)
        id: String,
    },

    /// Show income statistics and recent trends
    Summary {
        /// Number of months in the trend
        #[arg(short, long, default_value = "6")]
        months: u32,
    },

    /// Write an income report for a range of months as JSON
    Report {
        /// First month (YYYY-MM)
        start: String,
        /// Last month (YYYY-MM), defaults to the current month
        end: Option<String>,
        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    ledger: &mut Ledger,
    settings: &Settings,
    clock: &Clock,
    cmd: IncomeCommands,
) -> FinFreeResult<()> {
    match cmd {
        IncomeCommands::Add {
            amount,
            source,
            description,
            date,
            frequency,
            months,
        } => {
            let amount = parse_amount(&amount)?;
            let source = source
                .parse::<IncomeSource>()
                .map_err(|e| FinFreeError::Validation(e.to_string()))?;
            let date = parse_date_or_today(date.as_deref(), clock)?;

            let recurrence = match frequency {
                Some(frequency) => {
                    let months = months.map(|m| m.to_string()).unwrap_or_default();
                    RecurrencePlan::start()
                        .answer(&frequency)?
                        .answer(&months)?
                        .info()
                }
                None => None,
            };

            let created = IncomeService::new(storage, ledger).add(
                amount,
                source,
                &description,
                date,
                recurrence,
                clock.now,
            )?;

            let first = &created[0];
            println!(
                "Added income {}: {} from {} ({})",
                first.id,
                settings.format_money(first.amount),
                first.description,
                first.source.label()
            );
            if let Some(info) = first.recurring_info {
                println!(
                    "Created {} future {} entries through {}",
                    created.len() - 1,
                    info.frequency.as_str(),
                    created[created.len() - 1].date
                );
            }
        }

        IncomeCommands::List { month } => {
            let month = match month {
                Some(m) => Some(parse_month_or_current(Some(m.as_str()), clock)?),
                None => None,
            };
            let service = IncomeService::new(storage, ledger);
            println!("{}", format_income_list(&service.list(month), settings));
        }

        IncomeCommands::Delete { id } => {
            let removed = IncomeService::new(storage, ledger).delete(&id)?;
            let first = &removed[0];
            println!(
                "Deleted income {}: {} from {}",
                first.id,
                settings.format_money(first.amount),
                first.description
            );
            if removed.len() > 1 {
                println!("Also deleted {} related recurring entries", removed.len() - 1);
            }
        }

        IncomeCommands::Summary { months } => {
            let stats = IncomeStats::compute(&ledger.income, clock.today);
            let trends = income_trends(&ledger.income, clock.current_month(), months.max(1));
            println!("{}", format_income_summary(&stats, &trends, settings));
        }

        IncomeCommands::Report { start, end, output } => {
            let start = parse_month_or_current(Some(start.as_str()), clock)?;
            let end = parse_month_or_current(end.as_deref(), clock)?;
            if start > end {
                return Err(FinFreeError::Validation(format!(
                    "Report range starts after it ends ({} > {})",
                    start, end
                )));
            }

            let report = IncomeReport::generate(&ledger.income, start, end);
            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json).map_err(|e| {
                        FinFreeError::Io(format!("Failed to write {}: {}", path.display(), e))
                    })?;
                    println!("Wrote income report to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
