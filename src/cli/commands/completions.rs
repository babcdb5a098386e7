//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::HabitError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns `HabitError::Config` if the generated script is not UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, HabitError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "habitlog", &mut buf);
    String::from_utf8(buf).map_err(|e| HabitError::Config(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_mention_subcommands() {
        let script = generate_completions(Shell::Bash).unwrap();
        assert!(script.contains("habitlog"));
        assert!(script.contains("check"));
        assert!(script.contains("--database"));
    }

    #[test]
    fn test_fish_completions() {
        let script = generate_completions(Shell::Fish).unwrap();
        assert!(script.contains("complete -c habitlog"));
    }
}
