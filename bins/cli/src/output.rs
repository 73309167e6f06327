//! JSON output.

use reckon_shared::{AppError, AppResult};
use serde_json::Value;

/// Pretty-prints JSON to stdout.
pub fn print_json(value: &Value) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(format!("JSON serialization error: {e}")))?;
    println!("{rendered}");
    Ok(())
}
