//! Petty-cash CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_daily_status, format_petty_stats};
use crate::error::FinFreeResult;
use crate::reports::{compute_daily_status, PettyCashStats};
use crate::services::{PettyCashService, SettingsService};
use crate::state::Ledger;
use crate::storage::Storage;

use super::{parse_amount, Clock};

/// Petty-cash subcommands
#[derive(Subcommand)]
pub enum PettyCommands {
    /// Record a petty-cash purchase for today
    Add {
        amount: String,
        #[arg(short, long)]
        description: String,
        /// Time of purchase (HH:MM), defaults to now
        #[arg(short, long)]
        time: Option<String>,
    },

    /// Show today's spending against the daily limit
    Status,

    /// Show spending over recent days
    Stats {
        #[arg(short, long, default_value = "7")]
        days: u32,
    },

    /// Delete a petty-cash entry
    Delete {
        id: String,
    },

    /// Change the daily limit
    Limit {
        amount: String,
    },
}

/// Handle a petty-cash command
pub fn handle_petty_command(
    storage: &Storage,
    ledger: &mut Ledger,
    settings: &mut Settings,
    clock: &Clock,
    cmd: PettyCommands,
) -> FinFreeResult<()> {
    match cmd {
        PettyCommands::Add {
            amount,
            description,
            time,
        } => {
            let amount = parse_amount(&amount)?;
            let time = time.unwrap_or_else(|| {
                clock
                    .now
                    .with_timezone(&chrono::Local)
                    .format("%H:%M")
                    .to_string()
            });

            let outcome = PettyCashService::new(storage, ledger).add(
                amount,
                &description,
                &time,
                clock.today,
                settings.daily_limit,
                clock.now,
            )?;

            println!(
                "Added petty cash {}: {} for {} at {}",
                outcome.entry.id,
                settings.format_money(outcome.entry.amount),
                outcome.entry.description,
                outcome.entry.time
            );
            if let Some(over) = outcome.over_limit_by {
                println!(
                    "Warning: this puts you {} over your daily limit.",
                    settings.format_money(over)
                );
            } else if let Some(message) = outcome.status.alert_message() {
                println!("{}", message);
            }
        }

        PettyCommands::Status => {
            let status = compute_daily_status(&ledger.petty_cash, settings.daily_limit, clock.today);
            let service = PettyCashService::new(storage, ledger);
            print!(
                "{}",
                format_daily_status(&status, &service.entries_on(clock.today), settings)
            );
        }

        PettyCommands::Stats { days } => {
            let stats = PettyCashStats::compute(
                &ledger.petty_cash,
                settings.daily_limit,
                clock.today,
                days.max(1),
            );
            print!("{}", format_petty_stats(&stats, settings));
        }

        PettyCommands::Delete { id } => {
            let removed = PettyCashService::new(storage, ledger).delete(&id)?;
            println!(
                "Deleted petty cash {}: {} for {}",
                removed.id,
                settings.format_money(removed.amount),
                removed.description
            );
        }

        PettyCommands::Limit { amount } => {
            let limit = parse_amount(&amount)?;
            SettingsService::new(storage).set_daily_limit(settings, limit)?;
            println!("Daily limit set to {}", settings.format_money(settings.daily_limit));
        }
    }

    Ok(())
}
