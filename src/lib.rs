//! habitlog - a console habit tracker
//!
//! Habits are registered with a unit of measure and each one gets its own
//! log table in a local `SQLite` file. The interactive menu in [`cli`] sits
//! on top of the [`core::HabitRepository`] trait, which
//! [`habits::HabitStore`] implements.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod habits;
pub mod logging;
pub mod output;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::HabitError;
pub use habits::HabitStore;
