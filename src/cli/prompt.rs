//! Line-based prompting with re-prompt loops.
//!
//! Malformed console input (empty text, non-numeric ids, bad habit names)
//! is handled here and never reaches the store.

use std::io::{BufRead, Write};

use colored::Colorize;

use crate::cli::picker;
use crate::error::HabitError;
use crate::habits::Habit;
use crate::output::format_habits_pretty;
use crate::storage::validate_habit_name;

/// Largest quantity accepted for one log entry.
pub const MAX_QUANTITY: i64 = i32::MAX as i64;

/// Reads answers from `input` and writes prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    fuzzy_picker: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            fuzzy_picker: false,
        }
    }

    /// Select habits with the skim picker instead of a numbered list.
    #[must_use]
    pub const fn with_fuzzy_picker(mut self, enabled: bool) -> Self {
        self.fuzzy_picker = enabled;
        self
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn say(&mut self, message: &str) -> Result<(), HabitError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Print a line highlighted as a problem.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn warn(&mut self, message: &str) -> Result<(), HabitError> {
        writeln!(self.output, "{}", message.red())?;
        Ok(())
    }

    /// Show `prompt` and read one trimmed line.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InputClosed` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, HabitError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(HabitError::InputClosed);
        }

        Ok(line.trim().to_string())
    }

    /// Read a non-empty line, asking again until one is given.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InputClosed` at end of input.
    pub fn text(&mut self, prompt: &str, what: &str) -> Result<String, HabitError> {
        loop {
            let line = self.read_line(prompt)?;
            if !line.is_empty() {
                return Ok(line);
            }
            self.warn(&format!("Invalid {what}. Please try again."))?;
        }
    }

    /// Read a line that may be left empty.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InputClosed` at end of input.
    pub fn optional_text(&mut self, prompt: &str) -> Result<String, HabitError> {
        self.read_line(prompt)
    }

    /// Read a habit name that is usable as a log table identifier.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InputClosed` at end of input.
    pub fn habit_name(&mut self, prompt: &str) -> Result<String, HabitError> {
        loop {
            let name = self.text(prompt, "name")?;
            match validate_habit_name(&name) {
                Ok(()) => return Ok(name),
                Err(e) => self.warn(&e.to_string())?,
            }
        }
    }

    /// Read a habit name or nothing.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InputClosed` at end of input.
    pub fn optional_habit_name(&mut self, prompt: &str) -> Result<String, HabitError> {
        loop {
            let name = self.read_line(prompt)?;
            if name.is_empty() {
                return Ok(name);
            }
            match validate_habit_name(&name) {
                Ok(()) => return Ok(name),
                Err(e) => self.warn(&e.to_string())?,
            }
        }
    }

    /// Read a quantity between 0 and [`MAX_QUANTITY`].
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InputClosed` at end of input.
    pub fn quantity(&mut self, prompt: &str) -> Result<i64, HabitError> {
        self.integer(prompt, 0, MAX_QUANTITY, "quantity")
    }

    /// Read a log entry id (positive).
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InputClosed` at end of input.
    pub fn entry_id(&mut self, prompt: &str) -> Result<i64, HabitError> {
        self.integer(prompt, 1, i64::MAX, "ID")
    }

    fn integer(&mut self, prompt: &str, min: i64, max: i64, what: &str) -> Result<i64, HabitError> {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse::<i64>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                _ => self.warn(&format!("Invalid {what}. Please try again."))?,
            }
        }
    }

    /// Ask a yes/no question. An empty answer means no.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InputClosed` at end of input.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, HabitError> {
        loop {
            let answer = self.read_line(prompt)?.to_lowercase();
            match answer.as_str() {
                "y" | "yes" => return Ok(true),
                "" | "n" | "no" => return Ok(false),
                _ => self.warn("Please answer y or n.")?,
            }
        }
    }

    /// Let the user pick one habit, by number or by name.
    ///
    /// Returns `None` if the user cancels with an empty answer.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InputClosed` at end of input.
    pub fn select_habit(&mut self, habits: &[Habit]) -> Result<Option<Habit>, HabitError> {
        if self.fuzzy_picker {
            return Ok(picker::pick_habit(habits).and_then(|i| habits.get(i).cloned()));
        }

        self.say(format_habits_pretty(habits).trim_end())?;

        loop {
            let answer = self.read_line("Select a habit (number or name, empty to cancel): ")?;
            if answer.is_empty() {
                return Ok(None);
            }
            if let Some(index) = resolve_selection(habits, &answer) {
                return Ok(habits.get(index).cloned());
            }
            self.warn(&format!("Invalid choice {answer}. Please try again."))?;
        }
    }
}

/// Map an answer to a habit index: a 1-based number or a name.
fn resolve_selection(habits: &[Habit], answer: &str) -> Option<usize> {
    if let Ok(n) = answer.parse::<usize>() {
        return (1..=habits.len()).contains(&n).then(|| n - 1);
    }
    habits
        .iter()
        .position(|h| h.name.eq_ignore_ascii_case(answer))
}
