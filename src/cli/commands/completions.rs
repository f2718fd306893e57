//! Shell completions generation.
//!
//! Generates shell completion scripts for bash, zsh, fish, elvish and PowerShell.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::HabitError;

/// Generate shell completions for the specified shell.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, HabitError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "habitual", &mut buf);
    String::from_utf8(buf).map_err(|e| HabitError::Parse(format!("UTF-8 error: {e}")))
}

/// Execute the completions command.
///
/// # Errors
///
/// Returns an error if generation fails.
pub fn completions(shell: Shell) -> Result<String, HabitError> {
    generate_completions(shell).map(|script| script.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash_completions() {
        let script = generate_completions(Shell::Bash).unwrap();
        assert!(script.contains("habitual"));
        assert!(script.contains("complete"));
    }

    #[test]
    fn test_generate_zsh_completions() {
        let script = generate_completions(Shell::Zsh).unwrap();
        assert!(script.contains("#compdef habitual"));
    }

    #[test]
    fn test_generate_fish_completions() {
        let script = generate_completions(Shell::Fish).unwrap();
        assert!(script.contains("complete -c habitual"));
    }
}
