use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MortgageError;
use crate::money::{dollar, Rounding, MONTHS_IN_YEAR};
use crate::types::{Money, Percent, Rate};
use crate::MortgageResult;

/// Digits the monthly schedule keeps on the annual rate.
const SCHEDULE_RATE_DP: u32 = 6;

/// Loan-side parameters after the configuration layers are merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Annual interest as a percent (6 = 6%)
    pub interest: Percent,
    /// Loan term in months
    pub months: u32,
    /// Purchase price of the property
    pub value: Money,
    /// Absolute down payment; zero means use `down_fraction`
    #[serde(default)]
    pub down: Money,
    /// Down payment as a fraction of value (0.2 = 20%)
    #[serde(default)]
    pub down_fraction: Rate,
    /// Annual property tax as a percent of value
    #[serde(default)]
    pub tax_rate: Percent,
    /// Annual growth of the tax bill, capped at `appreciation_percent`
    #[serde(default)]
    pub tax_increase_percent: Percent,
    /// Annual appreciation of the property value
    #[serde(default)]
    pub appreciation_percent: Percent,
}

/// Immutable values derived once from a [`LoanInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub interest_rate_annual: Rate,
    pub term_months: u32,
    pub property_value: Money,
    pub down_payment: Money,
    pub principal: Money,
    pub tax_rate_annual: Percent,
    pub tax_increase_percent_annual: Percent,
    pub appreciation_percent_annual: Percent,
    pub monthly_payment: Money,
}

impl LoanTerms {
    pub fn new(input: &LoanInput) -> MortgageResult<Self> {
        if input.interest <= Decimal::ZERO {
            return Err(MortgageError::invalid("interest", "Invalid interest"));
        }
        if input.months == 0 {
            return Err(MortgageError::invalid("months", "Invalid months"));
        }
        if input.value <= Decimal::ZERO {
            return Err(MortgageError::invalid("value", "Invalid value"));
        }
        if input.down <= Decimal::ZERO && input.down_fraction <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "down",
                "Invalid down or down-fraction",
            ));
        }

        let property_value = dollar(input.value, Rounding::Up);
        let down_payment = if !input.down.is_zero() {
            dollar(input.down, Rounding::Up)
        } else {
            dollar(property_value * input.down_fraction, Rounding::Up)
        };
        if down_payment > property_value {
            return Err(MortgageError::invalid(
                "down",
                format!("Down payment {down_payment} exceeds property value {property_value}"),
            ));
        }
        let principal = dollar(property_value - down_payment, Rounding::Up);
        let interest_rate_annual = input.interest / dec!(100);

        let mut terms = LoanTerms {
            interest_rate_annual,
            term_months: input.months,
            property_value,
            down_payment,
            principal,
            tax_rate_annual: input.tax_rate,
            tax_increase_percent_annual: input
                .tax_increase_percent
                .min(input.appreciation_percent),
            appreciation_percent_annual: input.appreciation_percent,
            monthly_payment: Decimal::ZERO,
        };
        terms.monthly_payment = terms.level_payment()?;

        debug!(
            principal = %terms.principal,
            monthly_payment = %terms.monthly_payment,
            apy = %terms.apy(),
            "derived loan terms"
        );
        Ok(terms)
    }

    /// Annual rate as a fraction.
    pub fn rate(&self) -> Rate {
        self.interest_rate_annual
    }

    /// Annual rate quantized the way the monthly schedule consumes it.
    pub fn schedule_rate(&self) -> Rate {
        self.interest_rate_annual.round_dp(SCHEDULE_RATE_DP)
    }

    pub fn month_growth(&self) -> Decimal {
        Decimal::ONE + self.interest_rate_annual / Decimal::from(MONTHS_IN_YEAR)
    }

    pub fn apy(&self) -> Rate {
        self.month_growth().powu(MONTHS_IN_YEAR as u64) - Decimal::ONE
    }

    pub fn loan_years(&self) -> Decimal {
        Decimal::from(self.term_months) / Decimal::from(MONTHS_IN_YEAR)
    }

    pub fn annual_payment(&self) -> Money {
        self.monthly_payment * Decimal::from(MONTHS_IN_YEAR)
    }

    pub fn total_payout(&self) -> Money {
        self.monthly_payment * Decimal::from(self.term_months)
    }

    /// First-year property tax, unrounded.
    pub fn annual_tax(&self) -> Decimal {
        self.property_value * self.tax_rate_annual / dec!(100)
    }

    /// Annuity payment `principal * r / (12 * (1 - g^-n))`, rounded up to the cent.
    fn level_payment(&self) -> MortgageResult<Money> {
        let discount = (Decimal::ONE / self.month_growth())
            .checked_powu(self.term_months as u64)
            .ok_or_else(|| MortgageError::DivisionByZero {
                context: "annuity discount factor".into(),
            })?;
        let denominator = Decimal::from(MONTHS_IN_YEAR) * (Decimal::ONE - discount);
        if denominator.is_zero() {
            return Err(MortgageError::DivisionByZero {
                context: "monthly payment denominator".into(),
            });
        }
        Ok(dollar(
            self.principal * self.interest_rate_annual / denominator,
            Rounding::Up,
        ))
    }
}
