pub mod amortization;
pub mod summary;
pub mod terms;

pub use amortization::{step_month, Amortization, AmortizationState, MonthStep, MonthlyPayment};
pub use terms::{LoanInput, LoanTerms};
