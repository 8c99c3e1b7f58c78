//! Goal CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_goal_insights, format_goal_list, format_goal_stats};
use crate::error::{FinFreeError, FinFreeResult};
use crate::models::GoalCategory;
use crate::reports::{compute_goal_insights, GoalStats};
use crate::services::{CreateGoalInput, GoalService};
use crate::state::Ledger;
use crate::storage::Storage;

use super::{parse_amount, Clock};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        name: String,
        /// Target amount
        #[arg(short, long)]
        target: String,
        /// Amount already saved
        #[arg(short = 's', long, default_value = "0")]
        current: String,
        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: String,
        /// Category (emergency, vacation, car, house, investment, education, other)
        #[arg(short, long, default_value = "other")]
        category: String,
    },

    /// Set the amount saved toward a goal
    Update {
        /// Goal ID (the short form shown by `list` works)
        id: String,
        /// New total saved
        amount: String,
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List goals with progress and timelines
    List,

    /// Delete a goal
    Delete {
        id: String,
    },

    /// Show goal statistics and insights
    Stats,
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    ledger: &mut Ledger,
    settings: &Settings,
    clock: &Clock,
    cmd: GoalCommands,
) -> FinFreeResult<()> {
    let mut service = GoalService::new(storage, ledger);

    match cmd {
        GoalCommands::Add {
            name,
            target,
            current,
            deadline,
            category,
        } => {
            let input = CreateGoalInput {
                name,
                target: parse_amount(&target)?,
                current: parse_amount(&current)?,
                deadline: NaiveDate::parse_from_str(deadline.trim(), "%Y-%m-%d").map_err(|_| {
                    FinFreeError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", deadline))
                })?,
                category: category
                    .parse::<GoalCategory>()
                    .map_err(|e| FinFreeError::Validation(e.to_string()))?,
            };

            let goal = service.create(input, clock.today, clock.now)?;
            println!(
                "Created goal {}: {} ({} by {})",
                goal.id,
                goal.name,
                settings.format_money(goal.target),
                goal.deadline
            );
        }

        GoalCommands::Update { id, amount, note } => {
            let amount = parse_amount(&amount)?;
            let (goal, update) = service.update_progress(&id, amount, note.as_deref(), clock.now)?;

            let change = if update.difference.is_negative() {
                format!("withdrew {}", settings.format_money(-update.difference))
            } else {
                format!("added {}", settings.format_money(update.difference))
            };
            println!(
                "Updated {}: {} (now {} of {})",
                goal.name,
                change,
                settings.format_money(goal.current),
                settings.format_money(goal.target)
            );
            if update.just_completed {
                println!("Congratulations! You've reached your goal \"{}\"!", goal.name);
            }
        }

        GoalCommands::List => {
            println!("{}", format_goal_list(service.list(), clock.today, settings));
        }

        GoalCommands::Delete { id } => {
            let removed = service.delete(&id)?;
            println!("Deleted goal {}: {}", removed.id, removed.name);
        }

        GoalCommands::Stats => {
            let goals = service.list();
            println!("{}", format_goal_stats(&GoalStats::compute(goals, clock.today), settings));
            let insights = compute_goal_insights(goals, clock.today);
            if !insights.is_empty() {
                println!("{}", format_goal_insights(&insights));
            }
        }
    }

    Ok(())
}
