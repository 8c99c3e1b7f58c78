//! Conscious spending plan command

use clap::Args;

use crate::config::settings::Settings;
use crate::display::{format_plan_comparison, format_spending_plan};
use crate::error::FinFreeResult;
use crate::reports::{PlanComparison, SpendingPlan};
use crate::state::Ledger;

use super::{parse_amount, parse_month_or_current, Clock};

/// Arguments for `finfree plan`
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Monthly take-home income
    pub income: String,

    /// Compare the plan with recorded income and expenses
    #[arg(short, long)]
    pub compare: bool,

    /// Month to compare against (YYYY-MM), defaults to the current month
    #[arg(short, long, requires = "compare")]
    pub month: Option<String>,
}

/// Build the spending plan and optionally compare it with actuals
pub fn handle_plan_command(
    ledger: &Ledger,
    settings: &Settings,
    clock: &Clock,
    args: PlanArgs,
) -> FinFreeResult<()> {
    let income = parse_amount(&args.income)?;
    let plan = SpendingPlan::generate(income, clock.now)?;
    print!("{}", format_spending_plan(&plan, settings));

    if args.compare {
        let month = parse_month_or_current(args.month.as_deref(), clock)?;
        let comparison = PlanComparison::compute(&plan, &ledger.expenses, &ledger.income, month);
        println!();
        print!("{}", format_plan_comparison(&comparison, settings));
    }

    Ok(())
}
