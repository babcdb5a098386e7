//! Core abstractions for habitlog.
//!
//! This module provides the repository trait and shared utilities.

mod datetime;
mod traits;

pub use datetime::{format_timestamp, now_timestamp, parse_timestamp, TIMESTAMP_FORMAT};
#[cfg(test)]
pub use traits::MockHabitRepository;
pub use traits::HabitRepository;
