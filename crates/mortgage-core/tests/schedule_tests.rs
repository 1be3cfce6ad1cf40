use mortgage_core::loan::{Amortization, LoanInput, LoanTerms};
use mortgage_core::rental::{RentInput, RentTerms};
use mortgage_core::schedule::{annual, monthly, AnnualRows};
use mortgage_core::Parameters;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn loan_input() -> LoanInput {
    LoanInput {
        interest: dec!(6),
        months: 360,
        value: dec!(200000),
        down: dec!(40000),
        down_fraction: Decimal::ZERO,
        tax_rate: dec!(1.25),
        tax_increase_percent: dec!(2),
        appreciation_percent: dec!(3),
    }
}

fn rent_input() -> RentInput {
    RentInput {
        rent: dec!(1500),
        insurance: dec!(100),
        expense: dec!(50),
        hoa: Decimal::ZERO,
        rent_increase_percent: dec!(3),
        idle_months: dec!(1),
        ..RentInput::default()
    }
}

// ===========================================================================
// Thirty-year reference scenario
// ===========================================================================

#[test]
fn test_thirty_year_scenario() {
    let terms = LoanTerms::new(&loan_input()).unwrap();
    assert_eq!(terms.principal, dec!(160000));
    assert_eq!(terms.month_growth() - Decimal::ONE, dec!(0.005));
    assert_eq!(terms.monthly_payment, dec!(959.29));

    let months: Vec<_> = Amortization::new(&terms).collect();
    assert_eq!(months.len(), 360);
    assert_eq!(months.last().unwrap().balance, Decimal::ZERO);
}

#[test]
fn test_year_one_rent_with_idle_month() {
    let params = Parameters {
        loan: loan_input(),
        rent: rent_input(),
    };
    let out = annual::build_annual_schedule(&params).unwrap();
    assert_eq!(out.result.rows[0].rent, dec!(16500));
}

#[test]
fn test_rent_grows_each_year() {
    let params = Parameters {
        loan: loan_input(),
        rent: rent_input(),
    };
    let out = annual::build_annual_schedule(&params).unwrap();
    let rows = &out.result.rows;
    for pair in rows.windows(2) {
        assert!(
            pair[1].rent > pair[0].rent,
            "rent should rise from year {} to {}",
            pair[0].year,
            pair[1].year
        );
    }
}

#[test]
fn test_terminal_row_after_payoff() {
    let params = Parameters {
        loan: loan_input(),
        rent: rent_input(),
    };
    let out = annual::build_annual_schedule(&params).unwrap();
    let rows = &out.result.rows;
    let terminal = rows.last().unwrap();
    assert!(terminal.is_terminal);
    assert_eq!(terminal.interest, Decimal::ZERO);
    assert_eq!(terminal.principal, Decimal::ZERO);
    // Terminal year carries only tax and carrying costs
    assert!(terminal.expense < rows[0].expense);
    assert_eq!(terminal.equity, terminal.equity.round_dp(2));
}

#[test]
fn test_cash_flow_is_profit_less_principal() {
    let params = Parameters {
        loan: loan_input(),
        rent: rent_input(),
    };
    let out = annual::build_annual_schedule(&params).unwrap();
    for row in &out.result.rows {
        let diff = (row.profit - row.principal - row.cash_flow).abs();
        assert!(diff <= dec!(0.01), "year {}: diff {}", row.year, diff);
    }
}

#[test]
fn test_monthly_and_annual_totals_agree() {
    let params = Parameters {
        loan: loan_input(),
        rent: rent_input(),
    };
    let yearly = annual::build_annual_schedule(&params).unwrap();
    let monthly = monthly::build_monthly_schedule(&params.loan, None).unwrap();
    assert_eq!(yearly.result.total_interest, monthly.result.total_interest);
    assert_eq!(yearly.result.total_principal, monthly.result.total_principal);
}

#[test]
fn test_aggregator_is_lazy() {
    let loan = LoanTerms::new(&loan_input()).unwrap();
    let rent = RentTerms::new(&rent_input()).unwrap();
    let mut rows = AnnualRows::new(&loan, &rent);
    let first = rows.next().unwrap();
    assert_eq!(first.year, 1);
    // Only one year has been folded into the projections
    assert_eq!(rows.tracker().years_advanced(), 1);
}

// ===========================================================================
// Properties
// ===========================================================================

fn arb_loan() -> impl Strategy<Value = LoanInput> {
    (1u32..=1500, 12u32..=480, 50_000i64..2_000_000, 5u32..=50).prop_map(
        |(bps, months, value, down_pct)| LoanInput {
            interest: Decimal::new(bps as i64, 2),
            months,
            value: Decimal::from(value),
            down: Decimal::ZERO,
            down_fraction: Decimal::new(down_pct as i64, 2),
            tax_rate: Decimal::ZERO,
            tax_increase_percent: Decimal::ZERO,
            appreciation_percent: Decimal::ZERO,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn payment_never_under_amortizes(input in arb_loan()) {
        let terms = LoanTerms::new(&input).unwrap();
        prop_assert!(terms.monthly_payment * Decimal::from(terms.term_months) >= terms.principal);
    }

    #[test]
    fn schedule_retires_loan_within_term(input in arb_loan()) {
        let terms = LoanTerms::new(&input).unwrap();
        let months: Vec<_> = Amortization::new(&terms).collect();
        prop_assert!(months.len() as u32 <= terms.term_months);
        prop_assert_eq!(months.last().unwrap().balance, Decimal::ZERO);
        let paid: Decimal = months.iter().map(|m| m.principal).sum();
        prop_assert_eq!(paid, terms.principal);
    }

    #[test]
    fn tax_increase_never_exceeds_appreciation(tax in 0u32..1000, appr in 0u32..1000) {
        let mut input = loan_input();
        input.tax_increase_percent = Decimal::new(tax as i64, 2);
        input.appreciation_percent = Decimal::new(appr as i64, 2);
        let terms = LoanTerms::new(&input).unwrap();
        prop_assert!(terms.tax_increase_percent_annual <= terms.appreciation_percent_annual);
        if input.tax_increase_percent > input.appreciation_percent {
            prop_assert_eq!(terms.tax_increase_percent_annual, input.appreciation_percent);
        }
    }

    #[test]
    fn full_occupancy_collects_twelve_months(rent in 100i64..10_000) {
        let params = Parameters {
            loan: loan_input(),
            rent: RentInput {
                rent: Decimal::from(rent),
                ..RentInput::default()
            },
        };
        let out = annual::build_annual_schedule(&params).unwrap();
        prop_assert_eq!(out.result.rows[0].rent, Decimal::from(rent) * dec!(12));
    }
}
