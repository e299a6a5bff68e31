//! Dispatch, error types and shared helpers of the shell.

use std::io;

use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::core::LedgerView;
use crate::currency::{format_currency_value, format_date, FormatOptions};
use crate::domain::Displayable;
use crate::errors::{LedgerError, ValidationError};

use super::io as cli_io;
use super::output;
use super::registry::CommandEntry;
use super::ui::table::{Alignment, Table, TableColumn};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("{0}")]
    Command(String),
}

/// Failures of a single command; reported and the shell keeps going.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::Core(LedgerError::Validation(err))
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(err) => CliError::Core(err),
            CommandError::Io(err) => CliError::Io(err),
            CommandError::Dialoguer(err) => CliError::Dialoguer(err),
            other => CliError::Command(other.to_string()),
        }
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

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &input.to_lowercase()), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    /// Asks before destructive actions; script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        self.confirm("Exit shell?").map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(LedgerError::Network(message)) => {
                cli_io::print_error(format!("API request failed: {}", message));
                cli_io::print_hint("The loaded entries were left unchanged.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    /// Called after a mutation the server accepted: a failed reload must not
    /// read as a failed change.
    pub(crate) fn warn_reload_failure(&self) {
        if let Some(reason) = self.session.last_failure() {
            cli_io::print_warning(format!(
                "The change was applied, but reloading the period failed: {}",
                reason
            ));
            cli_io::print_hint("Run `refresh` to reload. Do not repeat the change.");
        }
    }

    /// Amount in the configured currency and locale.
    pub(crate) fn money(&self, amount: f64) -> String {
        format_currency_value(
            amount,
            &self.config.currency_code(),
            &self.config.locale_config(),
            &FormatOptions::default(),
        )
    }

    /// Prints the filtered table followed by the totals.
    pub(crate) fn render_view(&self, view: &LedgerView) {
        output::section(format!("Lançamentos {}", view.competencia));
        if view.rows.is_empty() {
            cli_io::print_info("Nenhum lançamento encontrado.");
        } else {
            println!("{}", self.entries_table(view).render());
        }
        cli_io::print_info(format!("{} lançamento(s)", view.count));
        self.render_summary(view);
    }

    pub(crate) fn render_summary(&self, view: &LedgerView) {
        let summary = &view.summary;
        cli_io::print_info(format!(
            "Receitas: {}  Despesas: {}  Saldo: {}",
            self.money(summary.total_revenue),
            self.money(summary.total_expense),
            self.money(summary.balance),
        ));
    }

    fn entries_table(&self, view: &LedgerView) -> Table {
        let locale = self.config.locale_config();
        let columns = vec![
            TableColumn::new("ID", Alignment::Left),
            TableColumn::new("Data", Alignment::Left),
            TableColumn::new("Licitação", Alignment::Left).max_width(32),
            TableColumn::new("Status", Alignment::Left),
            TableColumn::new("Tipo", Alignment::Left),
            TableColumn::new("Categoria", Alignment::Left).max_width(16),
            TableColumn::new("Fornecedor", Alignment::Left).max_width(16),
            TableColumn::new("Valor", Alignment::Right),
        ];
        let rows = view
            .rows
            .iter()
            .map(|entry| {
                vec![
                    entry.id.clone(),
                    format_date(&locale, entry.data),
                    entry.licitacao.clone(),
                    entry.status.display_label(),
                    entry.tipo.to_string(),
                    entry.categoria.clone(),
                    entry.fornecedor.clone().unwrap_or_default(),
                    self.money(entry.valor),
                ]
            })
            .collect();
        Table::new(columns, rows)
    }
}
