//! Command-line interface for habitlog.
//!
//! `args` holds the clap definitions; the rest implements the interactive
//! menu on top of [`crate::core::HabitRepository`].

pub mod args;
pub mod commands;
pub mod menu;
pub mod picker;
pub mod prompt;

pub use menu::{MenuChoice, Shell};
pub use prompt::Prompter;
