//! Shell context, dispatch, and shared helpers for command handlers.

use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime};
use strsim::levenshtein;

use crate::cli::io as cli_io;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::config::{Config, ConfigManager};
use crate::core::book_manager::BookManager;
use crate::core::services::ServiceError;
use crate::currency::{self, CurrencyCode, LocaleConfig};
use crate::domain::period::{DateWindow, ReportPeriod};
use crate::domain::Book;
use crate::errors::{CliError, TrackerError};
use crate::storage::JsonStorage;

use super::commands;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Book not loaded")]
    BookNotLoaded,
    #[error("exit requested")]
    ExitRequested,
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

pub struct ShellContext {
    mode: CliMode,
    registry: CommandRegistry,
    pub(crate) manager: BookManager,
    pub(crate) config_manager: ConfigManager,
    pub(crate) config: Config,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let storage = JsonStorage::new_default()?;
        let manager = BookManager::new(Box::new(storage));
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;

        let mut context = ShellContext {
            mode,
            registry,
            manager,
            config_manager,
            config,
            running: true,
        };
        context.auto_load_last()?;
        Ok(context)
    }

    fn auto_load_last(&mut self) -> Result<(), CliError> {
        if self.mode != CliMode::Interactive {
            return Ok(());
        }
        let Some(name) = self.config.last_opened_book.clone() else {
            return Ok(());
        };
        if let Ok(outcome) = self.manager.load(&name) {
            self.report_load(&outcome.warnings);
            cli_io::print_success(format!("Automatically loaded last book `{}`.", name));
        }
        Ok(())
    }

    pub(crate) fn book_name(&self) -> Option<String> {
        self.manager.current_name().map(|name| name.to_string())
    }

    pub(crate) fn prompt(&self) -> String {
        match self.book_name() {
            Some(name) => format!("{}> ", name),
            None => "expense-core> ".to_string(),
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_list(&self) -> Vec<&CommandEntry> {
        self.registry.list()
    }

    pub(crate) fn locale(&self) -> LocaleConfig {
        self.config.locale_config()
    }

    pub(crate) fn currency_code(&self) -> CurrencyCode {
        self.config.currency_code()
    }

    pub(crate) fn format_amount(&self, amount: f64) -> String {
        currency::format_currency_value(amount, &self.currency_code(), &self.locale())
    }

    pub(crate) fn format_date(&self, date: NaiveDate) -> String {
        currency::format_date(date)
    }

    pub(crate) fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub(crate) fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    pub(crate) fn parse_amount_arg(&self, raw: &str) -> Result<f64, CommandError> {
        currency::parse_amount(raw, &self.currency_code(), &self.locale())
            .map_err(CommandError::from)
    }

    pub(crate) fn parse_date_arg(raw: &str) -> Result<NaiveDate, CommandError> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            CommandError::InvalidArguments(format!("`{}` is not a date (expected YYYY-MM-DD)", raw))
        })
    }

    pub(crate) fn parse_datetime_arg(raw: &str) -> Result<NaiveDateTime, CommandError> {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").map_err(|_| {
            CommandError::InvalidArguments(format!(
                "`{}` is not a date-time (expected YYYY-MM-DDTHH:MM)",
                raw
            ))
        })
    }

    /// Parses `YYYY-MM` into that month's window.
    pub(crate) fn parse_month_arg(raw: &str) -> Result<DateWindow, CommandError> {
        let first = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d").map_err(|_| {
            CommandError::InvalidArguments(format!("`{}` is not a month (expected YYYY-MM)", raw))
        })?;
        Ok(ReportPeriod::Month.window_containing(first))
    }

    pub(crate) fn current_month(&self) -> DateWindow {
        ReportPeriod::Month.window_containing(self.today())
    }

    pub(crate) fn with_book<T>(
        &self,
        f: impl FnOnce(&Book) -> Result<T, CommandError>,
    ) -> Result<T, CommandError> {
        let book = self
            .manager
            .current
            .as_ref()
            .ok_or(CommandError::BookNotLoaded)?;
        f(book)
    }

    pub(crate) fn with_book_mut<T>(
        &mut self,
        f: impl FnOnce(&mut Book) -> Result<T, CommandError>,
    ) -> Result<T, CommandError> {
        let book = self
            .manager
            .current
            .as_mut()
            .ok_or(CommandError::BookNotLoaded)?;
        f(book)
    }

    pub(crate) fn require_named_book(&self) -> Result<String, CommandError> {
        self.manager
            .current_name()
            .map(|name| name.to_string())
            .ok_or_else(|| {
                CommandError::InvalidArguments(
                    "No named book associated. Use `book save <name>` once to bind it.".into(),
                )
            })
    }

    /// Interactive runs ask; scripts assume yes.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(prompt, false)
    }

    pub(crate) fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager
            .save(&self.config)
            .map_err(CommandError::from)
    }

    pub(crate) fn update_last_opened(&mut self, name: Option<&str>) -> CommandResult {
        self.config.last_opened_book = name.map(|value| value.to_string());
        self.manager.record_last_opened(name)?;
        self.persist_config()
    }

    pub(crate) fn report_load(&self, warnings: &[String]) {
        for warning in warnings {
            cli_io::print_warning(warning);
        }
    }

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

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action("Exit shell?", true)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::BookNotLoaded => {
                cli_io::print_error("Book not loaded. Use `book new` or `book load` first.");
                cli_io::print_hint("Try `book new Household` to get started.");
            }
            other => {
                cli_io::print_error(other.to_string());
            }
        }
    }

    pub(crate) fn set_book(&mut self, book: Book, path: Option<PathBuf>, name: Option<String>) {
        self.manager.set_current(book, path, name);
    }
}
