//! The interactive menu loop.

use std::io::{BufRead, Write};

use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use tracing::{debug, error};

use crate::cli::args::OutputFormat;
use crate::cli::commands;
use crate::cli::prompt::Prompter;
use crate::core::HabitRepository;
use crate::error::HabitError;

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddHabit,
    LogHabit,
    DeleteHabit,
    DeleteLoggedHabit,
    UpdateHabit,
    UpdateLoggedHabit,
    ViewAllHabits,
    ViewHabit,
    Report,
    Exit,
}

impl MenuChoice {
    /// Menu entries in display order, with their numbers.
    pub const ALL: [(u8, Self); 10] = [
        (1, Self::AddHabit),
        (2, Self::LogHabit),
        (3, Self::DeleteHabit),
        (4, Self::DeleteLoggedHabit),
        (5, Self::UpdateHabit),
        (6, Self::UpdateLoggedHabit),
        (7, Self::ViewAllHabits),
        (8, Self::ViewHabit),
        (9, Self::Report),
        (0, Self::Exit),
    ];

    /// Parse a numbered menu answer.
    #[must_use]
    pub fn parse(answer: &str) -> Option<Self> {
        let number = answer.trim().parse::<u8>().ok()?;
        Self::ALL
            .iter()
            .find(|(n, _)| *n == number)
            .map(|(_, choice)| *choice)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddHabit => "Add Habit",
            Self::LogHabit => "Log Habit",
            Self::DeleteHabit => "Delete Habit",
            Self::DeleteLoggedHabit => "Delete Logged Habit",
            Self::UpdateHabit => "Update Habit",
            Self::UpdateLoggedHabit => "Update Logged Habit",
            Self::ViewAllHabits => "View All Habits",
            Self::ViewHabit => "View Habit",
            Self::Report => "Habit Report",
            Self::Exit => "Exit",
        }
    }
}

/// Drives the menu over a habit repository.
pub struct Shell<'a, S: ?Sized, R, W> {
    store: &'a S,
    prompter: Prompter<R, W>,
    format: OutputFormat,
    clear_screen: bool,
}

impl<'a, S, R, W> Shell<'a, S, R, W>
where
    S: HabitRepository + ?Sized,
    R: BufRead,
    W: Write,
{
    pub const fn new(store: &'a S, prompter: Prompter<R, W>, format: OutputFormat) -> Self {
        Self {
            store,
            prompter,
            format,
            clear_screen: false,
        }
    }

    /// Clear the terminal before each menu.
    #[must_use]
    pub const fn with_clear_screen(mut self, enabled: bool) -> Self {
        self.clear_screen = enabled;
        self
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Run until the user exits or input ends.
    ///
    /// Failed commands are reported and the menu is shown again.
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminal cannot be written.
    pub fn run(&mut self) -> Result<(), HabitError> {
        loop {
            if self.clear_screen {
                let out = self.prompter.output();
                execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            }
            self.print_menu()?;

            let answer = match self.prompter.read_line("Enter your choice: ") {
                Ok(answer) => answer,
                Err(HabitError::InputClosed) => break,
                Err(e) => return Err(e),
            };

            let Some(choice) = MenuChoice::parse(&answer) else {
                self.prompter
                    .warn(&format!("Invalid choice {answer}. Please try again."))?;
                continue;
            };

            if choice == MenuChoice::Exit {
                self.prompter.say("Exiting...")?;
                break;
            }

            debug!(?choice, "menu choice");
            match commands::execute(choice, self.store, &mut self.prompter, self.format) {
                Ok(message) => {
                    if !message.is_empty() {
                        self.prompter.say(message.trim_end())?;
                    }
                }
                Err(HabitError::InputClosed) => break,
                Err(HabitError::Io(e)) => return Err(HabitError::Io(e)),
                Err(e) => {
                    if !e.is_recoverable() {
                        error!(error = %e, "command failed");
                    }
                    self.prompter.warn(&format!("error: {e}"))?;
                }
            }
            self.prompter.say("")?;
        }

        Ok(())
    }

    fn print_menu(&mut self) -> Result<(), HabitError> {
        self.prompter.say(&"Habit Tracker Menu".bold().to_string())?;
        for (number, choice) in MenuChoice::ALL {
            self.prompter.say(&format!("{number}. {}", choice.label()))?;
        }
        Ok(())
    }
}
