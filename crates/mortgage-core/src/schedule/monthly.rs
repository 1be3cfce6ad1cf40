use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::loan::{Amortization, LoanInput, LoanTerms};
use crate::types::*;
use crate::MortgageResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Principal plus interest actually paid this month
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyScheduleOutput {
    pub monthly_payment: Money,
    pub months: Vec<MonthlyRow>,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_paid: Money,
}

/// Full month-by-month amortization table. When `first_payment` is given
/// each row carries its due date, one calendar month apart.
pub fn build_monthly_schedule(
    input: &LoanInput,
    first_payment: Option<NaiveDate>,
) -> MortgageResult<ComputationOutput<MonthlyScheduleOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    let terms = LoanTerms::new(input)?;
    let mut months = Vec::with_capacity(terms.term_months as usize);
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;

    for (idx, m) in Amortization::new(&terms).enumerate() {
        let date = match first_payment {
            Some(first) => Some(first.checked_add_months(Months::new(idx as u32)).ok_or_else(
                || MortgageError::invalid("first_payment", "Payment date out of range"),
            )?),
            None => None,
        };
        total_interest += m.interest;
        total_principal += m.principal;
        months.push(MonthlyRow {
            month: idx as u32 + 1,
            date,
            payment: m.principal + m.interest,
            principal: m.principal,
            interest: m.interest,
            balance: m.balance,
        });
    }

    let output = MonthlyScheduleOutput {
        monthly_payment: terms.monthly_payment,
        months,
        total_interest,
        total_principal,
        total_paid: total_interest + total_principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization, interest rounded half-up each month",
        &serde_json::json!({
            "interest": input.interest.to_string(),
            "months": input.months,
            "principal": terms.principal.to_string(),
            "first_payment": first_payment,
        }),
        warnings,
        elapsed,
        output,
    ))
}
