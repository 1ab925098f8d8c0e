//! Dispatch, error reporting, and the error types shared by shell commands.

use std::io;

use rustyline::error::ReadlineError;

use crate::errors::LedgerError;

use super::io as cli_io;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Errors that abort the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(input) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Ledger(LedgerError::Validation(invalid)) => {
                let issues: Vec<String> =
                    invalid.issues().iter().map(ToString::to_string).collect();
                cli_io::print_error(format!("Fill in all fields: {}", issues.join("; ")));
                if let Some(entry) = self.command("add") {
                    cli_io::print_hint(format!("Usage: {}", entry.usage));
                }
            }
            other => cli_io::print_error(other),
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(lines: &[&str]) -> ShellContext {
    use crate::{core::LedgerStore, currency::CurrencyFormatter, storage::MemoryStore};

    let store = LedgerStore::new(Box::new(MemoryStore::new()), "transactions");
    let mut context =
        ShellContext::with_store(CliMode::Script, store, CurrencyFormatter::default());
    for line in lines {
        match super::shell::handle_line(&mut context, line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Money;

    #[test]
    fn add_and_summary_flow() {
        let context = process_script(&[
            "add income Salary 5000 Job",
            "add expense Rent 1500 Housing",
            "add income \"Year-end bonus\" 200 Job",
            "summary",
        ]);
        let descriptions: Vec<_> = context
            .store
            .transactions()
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(descriptions, ["Year-end bonus", "Rent", "Salary"]);
        assert_eq!(context.store.totals().balance, Money::from_units(3700));
    }

    #[test]
    fn invalid_add_is_reported_not_fatal() {
        let context = process_script(&["add expense Rent abc Housing", "add income"]);
        assert!(context.store.ledger().is_empty());
        assert!(context.running);
    }

    #[test]
    fn remove_by_position_and_id() {
        let mut context = process_script(&[
            "add income A 1 x",
            "add income B 2 x",
            "add income C 3 x",
            "remove @2",
        ]);
        let descriptions: Vec<_> = context
            .store
            .transactions()
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(descriptions, ["C", "A"]);

        let id = context.store.transactions()[0].id;
        let line = format!("remove {id}");
        crate::cli::shell::handle_line(&mut context, &line).unwrap();
        assert_eq!(context.store.ledger().len(), 1);
    }

    #[test]
    fn clear_needs_explicit_yes_in_script_mode() {
        let context = process_script(&["add income A 1 x", "clear"]);
        assert_eq!(context.store.ledger().len(), 1);

        let context = process_script(&["add income A 1 x", "clear --yes"]);
        assert!(context.store.ledger().is_empty());
    }

    #[test]
    fn exit_stops_processing() {
        let context = process_script(&["exit", "add income A 1 x"]);
        assert!(context.store.ledger().is_empty());
        assert!(!context.running);
    }

    #[test]
    fn unknown_command_continues() {
        let context = process_script(&["sumary", "list"]);
        assert!(context.running);
    }
}
