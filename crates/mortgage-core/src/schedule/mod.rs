pub mod annual;
pub mod monthly;

pub use annual::{build_annual_schedule, AnnualRows, AnnualScheduleOutput, AnnualSummaryRow};
pub use monthly::{build_monthly_schedule, MonthlyRow, MonthlyScheduleOutput};
