use serde::{Deserialize, Serialize};

/// A registered habit: its name doubles as the name of its log table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Habit {
    pub name: String,
    pub unit: String,
}

impl Habit {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
        }
    }
}

impl std::fmt::Display for Habit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.unit)
        }
    }
}

/// One logged occurrence of a habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub quantity: i64,
    /// Local time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

/// A habit together with its entries, ordered by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitLogs {
    pub habit: Habit,
    pub entries: Vec<LogEntry>,
}

impl HabitLogs {
    /// Sum of all quantities, saturating at the `i64` bounds.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.entries
            .iter()
            .fold(0_i64, |total, e| total.saturating_add(e.quantity))
    }

    #[must_use]
    pub fn entry(&self, id: i64) -> Option<&LogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}
