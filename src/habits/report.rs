//! Aggregate statistics and consistency checks over the habit store.

use serde::{Deserialize, Serialize};

use super::types::Habit;

/// How often and how much a habit was logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitReport {
    pub habit: Habit,
    /// Number of log entries.
    pub times: i64,
    /// Sum of all logged quantities.
    pub total_quantity: i64,
    pub first_logged: Option<String>,
    pub last_logged: Option<String>,
}

impl HabitReport {
    /// Mean quantity per entry, or `None` when nothing was logged.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_quantity(&self) -> Option<f64> {
        if self.times == 0 {
            None
        } else {
            Some(self.total_quantity as f64 / self.times as f64)
        }
    }
}

/// Mismatches between the registry and the per-habit log tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// Registered habits whose log table is missing.
    pub missing_tables: Vec<String>,
    /// Log-shaped tables with no registry row.
    pub orphaned_tables: Vec<String>,
}

impl IntegrityReport {
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.missing_tables.is_empty() && self.orphaned_tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_quantity() {
        let mut report = HabitReport {
            habit: Habit::new("water", "ml"),
            times: 0,
            total_quantity: 0,
            first_logged: None,
            last_logged: None,
        };
        assert!(report.average_quantity().is_none());

        report.times = 4;
        report.total_quantity = 1000;
        assert_eq!(report.average_quantity(), Some(250.0));
    }

    #[test]
    fn test_integrity_consistency() {
        assert!(IntegrityReport::default().is_consistent());

        let report = IntegrityReport {
            missing_tables: vec!["water".to_string()],
            orphaned_tables: vec![],
        };
        assert!(!report.is_consistent());
    }
}
