use serde_json::Value;

use mortgage_core::Parameters;

/// Echo the parameter set every other command would run with.
pub fn run_config(params: &Parameters) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::json!({ "result": params }))
}
