use serde_json::Value;

use mortgage_core::loan::summary;
use mortgage_core::Parameters;

pub fn run_summary(params: &Parameters) -> Result<Value, Box<dyn std::error::Error>> {
    let result = summary::summarize_loan(&params.loan)?;
    Ok(serde_json::to_value(result)?)
}
