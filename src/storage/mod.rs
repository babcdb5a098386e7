//! Storage layer for habitlog.
//!
//! This module owns the single `SQLite` file:
//! - the `habits` registry table (name -> unit)
//! - one log table per registered habit, named after the habit

mod database;
pub mod identifier;
mod migrations;

pub use database::Database;
pub use identifier::{quote_identifier, validate_habit_name};
