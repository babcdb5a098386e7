//! Habit registry and per-habit log store.
//!
//! Habits live in the `habits` registry table. Each registered habit owns
//! a log table with the same name:
//!
//! ```text
//! habits(name TEXT PRIMARY KEY, unit TEXT)
//! <name>(id INTEGER PRIMARY KEY AUTOINCREMENT, quantity INTEGER, timestamp TEXT)
//! ```
//!
//! Every registry row has a matching log table and vice versa. Operations
//! that touch both run in one transaction.

mod report;
mod store;
mod types;

pub use report::{HabitReport, IntegrityReport};
pub use store::HabitStore;
pub use types::{Habit, HabitLogs, LogEntry};
