use serde_json::Value;

use mortgage_core::schedule::annual;
use mortgage_core::Parameters;

pub fn run_schedule(params: &Parameters) -> Result<Value, Box<dyn std::error::Error>> {
    let result = annual::build_annual_schedule(params)?;
    Ok(serde_json::to_value(result)?)
}
