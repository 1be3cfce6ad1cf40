use std::iter::FusedIterator;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::loan::terms::LoanTerms;
use crate::money::{dollar, Rounding, MONTHS_IN_YEAR};
use crate::types::{Money, Rate};

/// One month of the schedule: balance after the payment and how the payment split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayment {
    pub balance: Money,
    pub principal: Money,
    pub interest: Money,
}

/// Outstanding balance and the number of payments already made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmortizationState {
    pub balance: Money,
    pub months_paid: u32,
}

/// Result of advancing the schedule by a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthStep {
    pub state: AmortizationState,
    pub payment: MonthlyPayment,
    pub is_final: bool,
}

/// Advance the loan by one month.
///
/// `rate` is the annual rate as a fraction. The month is final when the level
/// payment covers the balance plus this month's interest, or when the term is
/// reached; a final month pays off the exact remaining balance.
pub fn step_month(
    state: AmortizationState,
    level_payment: Money,
    rate: Rate,
    term_months: u32,
) -> MonthStep {
    let interest = dollar(
        state.balance * rate / Decimal::from(MONTHS_IN_YEAR),
        Rounding::HalfUp,
    );
    let months_paid = state.months_paid + 1;

    if level_payment >= state.balance + interest || months_paid >= term_months {
        return MonthStep {
            state: AmortizationState {
                balance: Decimal::ZERO,
                months_paid,
            },
            payment: MonthlyPayment {
                balance: dollar(Decimal::ZERO, Rounding::HalfUp),
                principal: state.balance,
                interest,
            },
            is_final: true,
        };
    }

    let principal = level_payment - interest;
    let balance = state.balance - principal;
    MonthStep {
        state: AmortizationState {
            balance,
            months_paid,
        },
        payment: MonthlyPayment {
            balance,
            principal,
            interest,
        },
        is_final: false,
    }
}

/// Lazy month-by-month schedule. Exhausted once the balance reaches zero;
/// build a new one to traverse again.
#[derive(Debug, Clone)]
pub struct Amortization {
    level_payment: Money,
    rate: Rate,
    term_months: u32,
    state: Option<AmortizationState>,
}

impl Amortization {
    pub fn new(terms: &LoanTerms) -> Self {
        Amortization {
            level_payment: terms.monthly_payment,
            rate: terms.schedule_rate(),
            term_months: terms.term_months,
            state: Some(AmortizationState {
                balance: terms.principal,
                months_paid: 0,
            }),
        }
    }

    pub fn level_payment(&self) -> Money {
        self.level_payment
    }

    /// Balance still owed; zero once the schedule is exhausted.
    pub fn remaining_balance(&self) -> Money {
        self.state.map_or(Decimal::ZERO, |s| s.balance)
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.is_none()
    }
}

impl Iterator for Amortization {
    type Item = MonthlyPayment;

    fn next(&mut self) -> Option<MonthlyPayment> {
        let state = self.state?;
        let step = step_month(state, self.level_payment, self.rate, self.term_months);
        self.state = if step.is_final { None } else { Some(step.state) };
        Some(step.payment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            Some(s) => (1, Some((self.term_months - s.months_paid) as usize)),
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for Amortization {}
