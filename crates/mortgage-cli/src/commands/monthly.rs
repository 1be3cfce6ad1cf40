use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use mortgage_core::schedule::monthly;
use mortgage_core::Parameters;

#[derive(Args)]
pub struct MonthlyArgs {
    /// Due date of the first payment (YYYY-MM-DD); adds a date column
    #[arg(long)]
    pub start: Option<NaiveDate>,
}

pub fn run_monthly(params: &Parameters, args: MonthlyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = monthly::build_monthly_schedule(&params.loan, args.start)?;
    Ok(serde_json::to_value(result)?)
}
