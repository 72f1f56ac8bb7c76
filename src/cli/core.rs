//! Core CLI dispatch and shell context helpers.

use std::{io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;
use tracing::debug;

use crate::{
    config::ConfigManager,
    core::{AppController, Clock, Screen, SystemClock},
    domain::catalog::sample_subscriptions,
    errors::AppError,
    storage::{JsonStore, MemoryStore},
    utils::PathResolver,
};

pub use crate::errors::CliError;

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

const SUGGESTION_DISTANCE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("`{command}` is not available on the {screen} screen")]
    Unavailable { command: String, screen: Screen },
    #[error(transparent)]
    Core(#[from] AppError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Prompt failed: {0}")]
    Prompt(String),
    #[error("exit requested")]
    ExitRequested,
}

impl From<dialoguer::Error> for CommandError {
    fn from(err: dialoguer::Error) -> Self {
        CommandError::Prompt(err.to_string())
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, PathResolver::base_dir(), Box::new(SystemClock))
    }

    /// Builds a context rooted at `base`, with durable flags read from disk
    /// and a fresh session scope.
    pub fn with_base_dir(
        mode: CliMode,
        base: PathBuf,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let durable = JsonStore::open_in(Some(base.clone()))?;
        let controller = AppController::new(Box::new(durable), Box::new(MemoryStore::new()))?;
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        cli_io::apply_config(&config);

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let subscriptions = sample_subscriptions(clock.today());

        Ok(ShellContext {
            mode,
            registry,
            controller,
            subscriptions,
            clock,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            last_command: None,
            running: true,
        })
    }

    /// Names of the commands usable on the current screen.
    pub fn available_commands(&self) -> Vec<&'static str> {
        self.registry
            .list_for(self.screen())
            .into_iter()
            .map(|entry| entry.name)
            .collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn screen(&self) -> Screen {
        self.controller.screen()
    }

    pub fn prompt(&self) -> String {
        format!("subtrack[{}]> ", self.screen())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let screen = self.screen();
        let Some(entry) = self.registry.get(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        if !entry.available_on(screen) {
            return Err(CommandError::Unavailable {
                command: entry.name.to_string(),
                screen,
            });
        }
        let handler = entry.handler;
        debug!(command, %screen, "dispatching command");

        match handler(self, args) {
            Ok(()) => {
                if self.screen() != screen {
                    self.announce_screen();
                }
                Ok(LoopControl::Continue)
            }
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        let needle = input.to_ascii_lowercase();
        let best = self
            .registry
            .list_for(self.screen())
            .into_iter()
            .map(|entry| (levenshtein(&needle, entry.name), entry.name))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance);
        match best {
            Some((_, name)) => cli_io::print_warning(format!(
                "Unknown command `{input}`. Did you mean `{name}`?"
            )),
            None => cli_io::print_warning(format!(
                "Unknown command `{input}`. Type `help` to list commands."
            )),
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::Unavailable { .. } => {
                cli_io::print_error(&err);
                let names: Vec<_> = self
                    .registry
                    .list_for(self.screen())
                    .iter()
                    .map(|entry| entry.name)
                    .collect();
                cli_io::print_info(format!("Available here: {}", names.join(", ")));
                Ok(())
            }
            CommandError::InvalidArguments(message) => {
                cli_io::print_warning(message);
                Ok(())
            }
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        cli_io::confirm_action(&self.theme, "Exit SubTrack?", true)
            .map_err(|err| CliError::Command(err.to_string()))
    }

    /// Prints what the user sees on the current screen.
    pub fn announce_screen(&self) {
        match self.screen() {
            Screen::Auth => {
                super::output::section("Welcome to SubTrack");
                cli_io::print_info("Track your subscriptions and save money.");
                cli_io::print_hint("Type `login` to sign in.");
            }
            Screen::Onboarding => commands::session::show_slide(self),
            Screen::PinVerify | Screen::PinSetup => commands::session::show_pin_pad(self),
            Screen::Main => {
                super::output::section("SubTrack");
                cli_io::print_hint(
                    "Type `dashboard`, `subscriptions` or `stats`; `help` lists everything.",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::core::FixedClock;

    fn context(home: &TempDir) -> ShellContext {
        let now = NaiveDate::from_ymd_opt(2026, 1, 31)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        ShellContext::with_base_dir(
            CliMode::Script,
            home.path().to_path_buf(),
            Box::new(FixedClock(now)),
        )
        .unwrap()
    }

    #[test]
    fn sample_data_follows_the_clock() {
        let home = TempDir::new().unwrap();
        let ctx = context(&home);
        let first = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        assert_eq!(ctx.subscriptions[0].next_payment, first);
        assert_eq!(ctx.prompt(), "subtrack[auth]> ");
    }

    #[test]
    fn dispatch_gates_commands_by_screen() {
        let home = TempDir::new().unwrap();
        let mut ctx = context(&home);

        let err = ctx.dispatch("dashboard", "dashboard", &[]).unwrap_err();
        assert!(matches!(err, CommandError::Unavailable { screen: Screen::Auth, .. }));

        ctx.dispatch("login", "login", &[]).unwrap();
        ctx.dispatch("skip", "skip", &[]).unwrap();
        assert_eq!(ctx.screen(), Screen::Main);
        ctx.dispatch("dashboard", "dashboard", &[]).unwrap();
    }

    #[test]
    fn exit_ends_the_loop() {
        let home = TempDir::new().unwrap();
        let mut ctx = context(&home);
        let control = ctx.dispatch("exit", "exit", &[]).unwrap();
        assert_eq!(control, LoopControl::Exit);
    }

    #[test]
    fn pin_command_rejects_letters() {
        let home = TempDir::new().unwrap();
        let mut ctx = context(&home);
        ctx.dispatch("login", "login", &[]).unwrap();
        ctx.dispatch("skip", "skip", &[]).unwrap();
        ctx.dispatch("set-pin", "set-pin", &[]).unwrap();
        assert_eq!(ctx.screen(), Screen::PinSetup);

        let err = ctx.dispatch("pin", "pin", &["12a4"]).unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        assert_eq!(ctx.controller.pin_pad().map(|pad| pad.filled()), Some(0));

        ctx.dispatch("set-pin", "set-pin", &[]).unwrap();
        assert_eq!(ctx.screen(), Screen::Main);
    }
}
