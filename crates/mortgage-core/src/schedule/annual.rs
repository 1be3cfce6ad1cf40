use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::trace;

use crate::config::Parameters;
use crate::loan::{Amortization, LoanTerms, MonthlyPayment};
use crate::money::{dollar, percent_of, Rounding, MONTHS_IN_YEAR};
use crate::rental::{ProjectionTracker, RentTerms};
use crate::types::*;
use crate::MortgageResult;

/// One year of ownership economics. Amounts are rounded to the cent and
/// percentages to two places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSummaryRow {
    pub year: u32,
    /// Payments that fell in this year (12, fewer for a payoff year, 0 for terminal)
    pub months: u32,
    /// Steady-state year after the loan is retired
    pub is_terminal: bool,
    pub interest: Money,
    pub principal: Money,
    /// Tax, monthly carrying costs and interest
    pub expense: Money,
    pub rent: Money,
    pub profit: Money,
    /// Profit over down payment plus principal paid to date
    pub profit_pct: Option<Decimal>,
    /// Profit less principal: cash actually left after the year
    pub cash_flow: Money,
    /// Profit plus the year's change in equity
    pub profit_with_equity: Money,
    pub profit_with_equity_pct: Option<Decimal>,
    /// As `profit_with_equity_pct` against the inflation-adjusted cost basis
    pub profit_with_real_equity_pct: Option<Decimal>,
    pub closing_balance: Money,
    pub equity: Money,
}

/// Lazily folds a monthly stream into annual rows, followed by one terminal row.
#[derive(Debug, Clone)]
pub struct AnnualRows<I> {
    months: I,
    tracker: ProjectionTracker,
    occupied_months: Decimal,
    previous_equity: Decimal,
    balance: Money,
    year: u32,
    finished: bool,
}

impl AnnualRows<Amortization> {
    pub fn new(loan: &LoanTerms, rent: &RentTerms) -> Self {
        AnnualRows::from_months(
            Amortization::new(loan),
            ProjectionTracker::new(loan, rent),
            rent,
            loan.principal,
        )
    }
}

impl<I: Iterator<Item = MonthlyPayment>> AnnualRows<I> {
    /// Aggregate any monthly stream. `opening_balance` is reported on the
    /// terminal row if the stream is empty.
    pub fn from_months(
        months: I,
        tracker: ProjectionTracker,
        rent: &RentTerms,
        opening_balance: Money,
    ) -> Self {
        let previous_equity = tracker.equity();
        AnnualRows {
            months,
            tracker,
            occupied_months: rent.occupied_months(),
            previous_equity,
            balance: opening_balance,
            year: 0,
            finished: false,
        }
    }

    pub fn tracker(&self) -> &ProjectionTracker {
        &self.tracker
    }

    fn close_year(&mut self, interest: Money, principal: Money, months: u32) -> AnnualSummaryRow {
        self.tracker
            .record_principal_and_balance(principal, self.balance);
        let equity = self.tracker.equity();
        let row = self.compose(interest, principal, equity, months, false);
        self.previous_equity = equity;
        self.tracker.advance_year();

        trace!(year = row.year, profit = %row.profit, cash_flow = %row.cash_flow, "closed year");
        row
    }

    fn terminal(&mut self) -> AnnualSummaryRow {
        let equity = self.tracker.equity_against(Decimal::ZERO);
        self.compose(Decimal::ZERO, Decimal::ZERO, equity, 0, true)
    }

    fn compose(
        &mut self,
        interest: Money,
        principal: Money,
        equity: Decimal,
        months: u32,
        is_terminal: bool,
    ) -> AnnualSummaryRow {
        self.year += 1;
        let t = &self.tracker;
        let twelve = Decimal::from(MONTHS_IN_YEAR);

        let expense = t.next_tax()
            + twelve * (t.next_expense() + t.next_hoa() + t.next_insurance())
            + interest;
        let rent = t.next_rent() * self.occupied_months;
        let profit = rent - expense;
        let cash_flow = profit - principal;
        let profit_with_equity = profit + (equity - self.previous_equity);

        let nominal = t.next_down_payment_nominal();
        let inflated = t.next_down_payment_inflated();

        AnnualSummaryRow {
            year: self.year,
            months,
            is_terminal,
            interest: dollar(interest, Rounding::HalfUp),
            principal: dollar(principal, Rounding::HalfUp),
            expense: dollar(expense, Rounding::HalfUp),
            rent: dollar(rent, Rounding::HalfUp),
            profit: dollar(profit, Rounding::HalfUp),
            profit_pct: percent_of(profit, nominal).map(round_pct),
            cash_flow: dollar(cash_flow, Rounding::HalfUp),
            profit_with_equity: dollar(profit_with_equity, Rounding::HalfUp),
            profit_with_equity_pct: percent_of(profit_with_equity, nominal).map(round_pct),
            profit_with_real_equity_pct: percent_of(profit_with_equity, inflated).map(round_pct),
            closing_balance: dollar(self.balance, Rounding::HalfUp),
            equity: dollar(equity, Rounding::HalfUp),
        }
    }
}

impl<I: Iterator<Item = MonthlyPayment>> Iterator for AnnualRows<I> {
    type Item = AnnualSummaryRow;

    fn next(&mut self) -> Option<AnnualSummaryRow> {
        if self.finished {
            return None;
        }

        let mut interest = Decimal::ZERO;
        let mut principal = Decimal::ZERO;
        let mut count = 0u32;
        while count < MONTHS_IN_YEAR {
            match self.months.next() {
                Some(m) => {
                    interest += m.interest;
                    principal += m.principal;
                    self.balance = m.balance;
                    count += 1;
                }
                None => break,
            }
        }

        if count == 0 {
            self.finished = true;
            return Some(self.terminal());
        }
        Some(self.close_year(interest, principal, count))
    }
}

fn round_pct(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Complete year-by-year ownership projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualScheduleOutput {
    pub monthly_payment: Money,
    /// Loan years followed by the terminal row
    pub rows: Vec<AnnualSummaryRow>,
    pub total_interest: Money,
    pub total_principal: Money,
}

pub fn build_annual_schedule(
    params: &Parameters,
) -> MortgageResult<ComputationOutput<AnnualScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let loan = LoanTerms::new(&params.loan)?;
    let rent = RentTerms::new(&params.rent)?;
    if loan.tax_increase_percent_annual < params.loan.tax_increase_percent {
        warnings.push(format!(
            "tax-increase-percent {} clamped to appreciation-percent {}",
            params.loan.tax_increase_percent, loan.appreciation_percent_annual
        ));
    }

    let rows: Vec<AnnualSummaryRow> = AnnualRows::new(&loan, &rent).collect();

    if rows
        .iter()
        .any(|r| r.profit_pct.is_none() || r.profit_with_real_equity_pct.is_none())
    {
        warnings.push(
            "Down payment basis is zero; percentage columns are undefined".into(),
        );
    }

    let total_interest: Money = rows.iter().map(|r| r.interest).sum();
    let total_principal: Money = rows.iter().map(|r| r.principal).sum();

    let output = AnnualScheduleOutput {
        monthly_payment: loan.monthly_payment,
        rows,
        total_interest,
        total_principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly amortization aggregated per year with inflating rent and costs",
        params,
        warnings,
        elapsed,
        output,
    ))
}
