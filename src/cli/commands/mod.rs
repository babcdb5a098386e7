//! Menu command implementations for habitlog.
//!
//! Each command collects its input through the [`Prompter`], calls the
//! repository, and returns the text to show. None of them print results
//! directly.

mod completions;

pub use completions::generate_completions;

use std::io::{BufRead, Write};

use crate::cli::args::OutputFormat;
use crate::cli::menu::MenuChoice;
use crate::cli::prompt::Prompter;
use crate::core::HabitRepository;
use crate::error::HabitError;
use crate::habits::{Habit, HabitLogs};
use crate::output::{
    format_all_logs, format_habit_logs, format_habit_logs_pretty, format_report,
};

/// Run the command behind a menu choice.
///
/// # Errors
///
/// Returns an error if input ends, the store fails, or output formatting fails.
pub fn execute<S, R, W>(
    choice: MenuChoice,
    store: &S,
    prompter: &mut Prompter<R, W>,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    S: HabitRepository + ?Sized,
    R: BufRead,
    W: Write,
{
    match choice {
        MenuChoice::AddHabit => add_habit(store, prompter),
        MenuChoice::LogHabit => log_habit(store, prompter),
        MenuChoice::DeleteHabit => delete_habit(store, prompter),
        MenuChoice::DeleteLoggedHabit => delete_logged_habit(store, prompter),
        MenuChoice::UpdateHabit => update_habit(store, prompter),
        MenuChoice::UpdateLoggedHabit => update_logged_habit(store, prompter),
        MenuChoice::ViewAllHabits => view_all_habits(store, format),
        MenuChoice::ViewHabit => view_habit(store, prompter, format),
        MenuChoice::Report => report(store, prompter, format),
        MenuChoice::Exit => Ok(String::new()),
    }
}

/// Add a habit and its empty log.
///
/// # Errors
///
/// Returns an error if input ends or the store fails.
pub fn add_habit<S, R, W>(store: &S, prompter: &mut Prompter<R, W>) -> Result<String, HabitError>
where
    S: HabitRepository + ?Sized,
    R: BufRead,
    W: Write,
{
    let name = prompter.habit_name("Enter the habit name: ")?;
    let unit = prompter.text("Enter the unit of measurement: ", "unit")?;

    if store.add_habit(&name, &unit)? {
        Ok(format!("Habit '{name}' added."))
    } else {
        Ok(format!("Habit '{name}' already exists."))
    }
}

/// Log a quantity for a habit, stamped now.
///
/// # Errors
///
/// Returns an error if input ends or the store fails.
pub fn log_habit<S, R, W>(store: &S, prompter: &mut Prompter<R, W>) -> Result<String, HabitError>
where
    S: HabitRepository + ?Sized,
    R: BufRead,
    W: Write,
{
    let Some(habit) = select_habit(store, prompter)? else {
        return Ok(cancelled());
    };
    let quantity = prompter.quantity(&format!("Enter the quantity ({}): ", unit_or_units(&habit)))?;

    if store.log_entry(&habit.name, quantity)? {
        Ok(format!("Logged {quantity} {} of {}.", habit.unit, habit.name))
    } else {
        Ok(not_found(&habit.name))
    }
}

/// Delete a habit and its whole log after confirmation.
///
/// # Errors
///
/// Returns an error if input ends or the store fails.
pub fn delete_habit<S, R, W>(store: &S, prompter: &mut Prompter<R, W>) -> Result<String, HabitError>
where
    S: HabitRepository + ?Sized,
    R: BufRead,
    W: Write,
{
    let Some(habit) = select_habit(store, prompter)? else {
        return Ok(cancelled());
    };
    let question = format!(
        "Delete '{}' and all of its entries? [y/N]: ",
        habit.name
    );
    if !prompter.confirm(&question)? {
        return Ok(cancelled());
    }

    if store.delete_habit(&habit.name)? {
        Ok(format!("Habit '{}' deleted.", habit.name))
    } else {
        Ok(not_found(&habit.name))
    }
}

/// Delete one entry from a habit's log.
///
/// # Errors
///
/// Returns an error if input ends or the store fails.
pub fn delete_logged_habit<S, R, W>(
    store: &S,
    prompter: &mut Prompter<R, W>,
) -> Result<String, HabitError>
where
    S: HabitRepository + ?Sized,
    R: BufRead,
    W: Write,
{
    let Some(habit) = select_habit(store, prompter)? else {
        return Ok(cancelled());
    };
    if show_entries(store, prompter, &habit)?.is_none() {
        return Ok(format!("No entries logged for '{}'.", habit.name));
    }
    let id = prompter.entry_id("Enter the entry ID to delete: ")?;

    if store.delete_log_entry(&habit.name, id)? {
        Ok(format!("Entry {id} deleted from '{}'.", habit.name))
    } else {
        Ok(format!("Entry {id} not found in '{}'.", habit.name))
    }
}

/// Rename a habit and/or change its unit.
///
/// # Errors
///
/// Returns an error if input ends or the store fails.
pub fn update_habit<S, R, W>(store: &S, prompter: &mut Prompter<R, W>) -> Result<String, HabitError>
where
    S: HabitRepository + ?Sized,
    R: BufRead,
    W: Write,
{
    let Some(habit) = select_habit(store, prompter)? else {
        return Ok(cancelled());
    };
    let new_name = prompter.optional_habit_name(&format!(
        "Enter the new name (empty keeps '{}'): ",
        habit.name
    ))?;
    let new_unit = prompter.optional_text(&format!(
        "Enter the new unit (empty keeps '{}'): ",
        habit.unit
    ))?;

    if new_name.is_empty() && new_unit.is_empty() {
        return Ok("Nothing to change.".to_string());
    }

    if store.update_habit(&habit.name, &habit.unit, &new_name, &new_unit)? {
        let updated = Habit::new(
            if new_name.is_empty() { &habit.name } else { &new_name },
            if new_unit.is_empty() { &habit.unit } else { &new_unit },
        );
        Ok(format!("Habit updated: {habit} -> {updated}."))
    } else {
        Ok(not_found(&habit.name))
    }
}

/// Change the quantity of one logged entry.
///
/// # Errors
///
/// Returns an error if input ends or the store fails.
pub fn update_logged_habit<S, R, W>(
    store: &S,
    prompter: &mut Prompter<R, W>,
) -> Result<String, HabitError>
where
    S: HabitRepository + ?Sized,
    R: BufRead,
    W: Write,
{
    let Some(habit) = select_habit(store, prompter)? else {
        return Ok(cancelled());
    };
    let Some(logs) = show_entries(store, prompter, &habit)? else {
        return Ok(format!("No entries logged for '{}'.", habit.name));
    };
    let id = prompter.entry_id("Enter the entry ID to update: ")?;
    let Some(entry) = logs.entry(id) else {
        return Ok(format!("Entry {id} not found in '{}'.", habit.name));
    };
    let quantity = prompter.quantity(&format!(
        "Enter the new quantity (was {} {}): ",
        entry.quantity,
        unit_or_units(&habit)
    ))?;

    if store.update_log_entry(&habit.name, id, quantity)? {
        Ok(format!("Entry {id} of '{}' updated.", habit.name))
    } else {
        Ok(format!("Entry {id} not found in '{}'.", habit.name))
    }
}

/// Show every habit with its log.
///
/// # Errors
///
/// Returns an error if the store fails or output formatting fails.
pub fn view_all_habits<S>(store: &S, format: OutputFormat) -> Result<String, HabitError>
where
    S: HabitRepository + ?Sized,
{
    let all = store.list_habits_with_logs()?;
    format_all_logs(&all, format)
}

/// Show one habit's log.
///
/// # Errors
///
/// Returns an error if input ends, the store fails, or output formatting fails.
pub fn view_habit<S, R, W>(
    store: &S,
    prompter: &mut Prompter<R, W>,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    S: HabitRepository + ?Sized,
    R: BufRead,
    W: Write,
{
    let Some(habit) = select_habit(store, prompter)? else {
        return Ok(cancelled());
    };

    match store.habit_logs(&habit.name)? {
        Some(logs) => format_habit_logs(&logs, format),
        None => Ok(not_found(&habit.name)),
    }
}

/// Show how often and how much a habit was logged.
///
/// # Errors
///
/// Returns an error if input ends, the store fails, or output formatting fails.
pub fn report<S, R, W>(
    store: &S,
    prompter: &mut Prompter<R, W>,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    S: HabitRepository + ?Sized,
    R: BufRead,
    W: Write,
{
    let Some(habit) = select_habit(store, prompter)? else {
        return Ok(cancelled());
    };

    match store.habit_report(&habit.name)? {
        Some(report) => format_report(&report, format),
        None => Ok(not_found(&habit.name)),
    }
}

/// Ask the user to pick one of the registered habits.
fn select_habit<S, R, W>(
    store: &S,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<Habit>, HabitError>
where
    S: HabitRepository + ?Sized,
    R: BufRead,
    W: Write,
{
    let habits = store.list_habits()?;
    if habits.is_empty() {
        return Err(HabitError::NotFound(
            "no habits yet, add one first".to_string(),
        ));
    }
    prompter.select_habit(&habits)
}

/// Print a habit's entries so the user can pick an id.
///
/// Returns `None` if there is nothing to pick from.
fn show_entries<S, R, W>(
    store: &S,
    prompter: &mut Prompter<R, W>,
    habit: &Habit,
) -> Result<Option<HabitLogs>, HabitError>
where
    S: HabitRepository + ?Sized,
    R: BufRead,
    W: Write,
{
    let Some(logs) = store.habit_logs(&habit.name)? else {
        return Err(HabitError::NotFound(format!("habit '{}'", habit.name)));
    };
    if logs.entries.is_empty() {
        return Ok(None);
    }
    prompter.say(format_habit_logs_pretty(&logs).trim_end())?;
    Ok(Some(logs))
}

fn unit_or_units(habit: &Habit) -> &str {
    if habit.unit.is_empty() {
        "units"
    } else {
        &habit.unit
    }
}

fn cancelled() -> String {
    "Cancelled.".to_string()
}

fn not_found(name: &str) -> String {
    format!("Habit '{name}' not found.")
}
