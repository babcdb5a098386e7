//! Output formatting for habitlog.
//!
//! This module renders habits, logs, and reports either as colored text
//! or as JSON. The store never formats anything itself.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::HabitError;
use crate::habits::{HabitLogs, HabitReport, IntegrityReport};

pub use json::*;
pub use pretty::*;

/// Format one habit's log based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_habit_logs(logs: &HabitLogs, format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_habit_logs_pretty(logs)),
        OutputFormat::Json => to_json(logs),
    }
}

/// Format every habit with its log based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_all_logs(all: &[HabitLogs], format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_all_logs_pretty(all)),
        OutputFormat::Json => format_all_logs_json(all),
    }
}

/// Format a habit report based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_report(report: &HabitReport, format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_report_pretty(report)),
        OutputFormat::Json => to_json(report),
    }
}

/// Format an integrity report based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_integrity(report: &IntegrityReport, format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_integrity_pretty(report)),
        OutputFormat::Json => to_json(report),
    }
}
