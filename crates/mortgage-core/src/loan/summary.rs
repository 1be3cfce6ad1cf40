use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::loan::terms::{LoanInput, LoanTerms};
use crate::types::*;
use crate::MortgageResult;

/// Headline figures for a fixed-rate loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    /// Annual rate as a fraction
    pub rate: Rate,
    /// `1 + rate / 12`
    pub month_growth: Decimal,
    /// Effective annual yield of monthly compounding
    pub apy: Rate,
    pub payoff_years: Decimal,
    pub payoff_months: u32,
    /// Amount borrowed
    pub amount: Money,
    pub monthly_payment: Money,
    pub annual_payment: Money,
    /// Level payment times the term
    pub total_payout: Money,
}

pub fn summarize_loan(input: &LoanInput) -> MortgageResult<ComputationOutput<LoanSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let terms = LoanTerms::new(input)?;
    if terms.tax_increase_percent_annual < input.tax_increase_percent {
        warnings.push(format!(
            "tax-increase-percent {} clamped to appreciation-percent {}",
            input.tax_increase_percent, terms.appreciation_percent_annual
        ));
    }

    let summary = LoanSummary {
        rate: terms.rate(),
        month_growth: terms.month_growth(),
        apy: terms.apy().round_dp(6),
        payoff_years: terms.loan_years(),
        payoff_months: terms.term_months,
        amount: terms.principal,
        monthly_payment: terms.monthly_payment,
        annual_payment: terms.annual_payment(),
        total_payout: terms.total_payout(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate annuity, payment rounded up to the cent",
        input,
        warnings,
        elapsed,
        summary,
    ))
}
