//! JSON output formatting for habitlog.

use serde::Serialize;
use serde_json::json;

use crate::error::HabitError;
use crate::habits::HabitLogs;

/// Format every habit with its log as JSON
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_all_logs_json(all: &[HabitLogs]) -> Result<String, HabitError> {
    let output = json!({
        "count": all.len(),
        "items": all
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, HabitError> {
    Ok(serde_json::to_string_pretty(value)?)
}
