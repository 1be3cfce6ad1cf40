use rust_decimal::Decimal;
use tracing::trace;

use crate::loan::terms::LoanTerms;
use crate::money::{inflate, INFLATION_PERCENT};
use crate::rental::terms::RentTerms;
use crate::types::{Money, Percent};

/// Year-ahead projections of every inflating quantity.
///
/// Starts at the base values. At each year boundary the caller first
/// records the year's principal and closing balance, reads the projections
/// for that year, then calls [`advance_year`](Self::advance_year) so the
/// following year sees inflated values. Year 1 therefore reads the base
/// values untouched.
#[derive(Debug, Clone)]
pub struct ProjectionTracker {
    rent_increase_percent: Percent,
    tax_increase_percent: Percent,
    appreciation_percent: Percent,

    next_rent: Decimal,
    next_insurance: Decimal,
    next_expense: Decimal,
    next_hoa: Decimal,
    next_tax: Decimal,
    next_property_value: Decimal,

    nominal_basis: Money,
    inflated_basis: Decimal,
    equity: Decimal,
    years_advanced: u32,
}

impl ProjectionTracker {
    pub fn new(loan: &LoanTerms, rent: &RentTerms) -> Self {
        ProjectionTracker {
            rent_increase_percent: rent.rent_increase_percent_annual,
            tax_increase_percent: loan.tax_increase_percent_annual,
            appreciation_percent: loan.appreciation_percent_annual,
            next_rent: rent.monthly_rent,
            next_insurance: rent.monthly_insurance,
            next_expense: rent.monthly_expense,
            next_hoa: rent.monthly_hoa,
            next_tax: loan.annual_tax(),
            next_property_value: loan.property_value,
            nominal_basis: loan.down_payment,
            inflated_basis: loan.down_payment,
            equity: loan.down_payment,
            years_advanced: 0,
        }
    }

    /// Monthly rent for the year being read.
    pub fn next_rent(&self) -> Decimal {
        self.next_rent
    }

    pub fn next_insurance(&self) -> Decimal {
        self.next_insurance
    }

    pub fn next_expense(&self) -> Decimal {
        self.next_expense
    }

    pub fn next_hoa(&self) -> Decimal {
        self.next_hoa
    }

    /// Annual property tax for the year being read.
    pub fn next_tax(&self) -> Decimal {
        self.next_tax
    }

    pub fn next_property_value(&self) -> Decimal {
        self.next_property_value
    }

    /// Down payment plus all principal recorded so far, never inflated.
    pub fn next_down_payment_nominal(&self) -> Decimal {
        self.nominal_basis
    }

    /// Running basis of down payment and principal, inflated as a whole at
    /// every advanced year.
    pub fn next_down_payment_inflated(&self) -> Decimal {
        self.inflated_basis
    }

    /// Property value less the last recorded balance.
    pub fn equity(&self) -> Decimal {
        self.equity
    }

    /// Equity the current property value would carry against `balance`.
    pub fn equity_against(&self, balance: Money) -> Decimal {
        self.next_property_value - balance
    }

    pub fn years_advanced(&self) -> u32 {
        self.years_advanced
    }

    /// Fold a closed year's principal into both down-payment bases and
    /// re-mark equity against the closing balance.
    pub fn record_principal_and_balance(&mut self, yearly_principal: Money, balance: Money) {
        self.nominal_basis += yearly_principal;
        self.inflated_basis += yearly_principal;
        self.equity = self.equity_against(balance);
    }

    /// Inflate every projection by one year.
    pub fn advance_year(&mut self) {
        self.next_rent = inflate(self.next_rent, self.rent_increase_percent);
        self.next_insurance = inflate(self.next_insurance, INFLATION_PERCENT);
        self.next_expense = inflate(self.next_expense, INFLATION_PERCENT);
        self.next_hoa = inflate(self.next_hoa, INFLATION_PERCENT);
        self.next_property_value = inflate(self.next_property_value, self.appreciation_percent);
        self.next_tax = inflate(self.next_tax, self.tax_increase_percent);
        self.inflated_basis = inflate(self.inflated_basis, INFLATION_PERCENT);
        self.years_advanced += 1;

        trace!(
            year = self.years_advanced,
            rent = %self.next_rent,
            property_value = %self.next_property_value,
            "advanced projections"
        );
    }
}
