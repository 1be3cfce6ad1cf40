use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::money::{dollar, Rounding, MONTHS_IN_YEAR};
use crate::types::{Money, Percent};
use crate::MortgageResult;

/// Rental-side parameters after the configuration layers are merged.
/// All amounts are monthly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RentInput {
    /// Flat monthly rent; exclusive with `rent_per_sq_feet`
    #[serde(default)]
    pub rent: Money,
    #[serde(default)]
    pub rent_per_sq_feet: Money,
    #[serde(default)]
    pub sqft: Decimal,
    #[serde(default)]
    pub insurance: Money,
    #[serde(default)]
    pub expense: Money,
    #[serde(default)]
    pub hoa: Money,
    #[serde(default)]
    pub rent_increase_percent: Percent,
    /// Months per year with no tenant; may be fractional
    #[serde(default)]
    pub idle_months: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentTerms {
    pub monthly_rent: Money,
    pub monthly_insurance: Money,
    pub monthly_expense: Money,
    pub monthly_hoa: Money,
    pub rent_increase_percent_annual: Percent,
    pub idle_months_per_year: Decimal,
}

impl RentTerms {
    pub fn new(input: &RentInput) -> MortgageResult<Self> {
        if !input.rent.is_zero() && !input.rent_per_sq_feet.is_zero() {
            return Err(MortgageError::invalid(
                "rent",
                "Cannot have both rent and rent-per-sq-feet",
            ));
        }
        if input.rent_per_sq_feet.is_zero() != input.sqft.is_zero() {
            return Err(MortgageError::invalid(
                "sqft",
                "sqft and rent-per-sq-feet must be both 0 or set to some value",
            ));
        }
        if input.rent <= Decimal::ZERO && input.rent_per_sq_feet <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "rent",
                "Invalid rent or rent-per-sq-feet",
            ));
        }
        let months = Decimal::from(MONTHS_IN_YEAR);
        if input.idle_months < Decimal::ZERO || input.idle_months > months {
            return Err(MortgageError::invalid(
                "idle_months",
                format!("Idle months must be between 0 and {months}"),
            ));
        }

        let monthly_rent = if !input.rent.is_zero() {
            dollar(input.rent, Rounding::Up)
        } else {
            dollar(input.sqft * input.rent_per_sq_feet, Rounding::Up)
        };

        Ok(RentTerms {
            monthly_rent,
            monthly_insurance: dollar(input.insurance, Rounding::Up),
            monthly_expense: dollar(input.expense, Rounding::Up),
            monthly_hoa: dollar(input.hoa, Rounding::Up),
            rent_increase_percent_annual: input.rent_increase_percent,
            idle_months_per_year: input.idle_months,
        })
    }

    /// Months per year that collect rent.
    pub fn occupied_months(&self) -> Decimal {
        Decimal::from(MONTHS_IN_YEAR) - self.idle_months_per_year
    }
}
