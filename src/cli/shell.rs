use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Context as ReadlineContext, Editor, Helper,
};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::io as cli_io;

const SCRIPT_ENV: &str = "SUBTRACK_CLI_SCRIPT";

/// Commands whose arguments must never reach the history file.
const SENSITIVE_COMMANDS: &[&str] = &["pin"];

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    context.announce_screen();

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<ScreenCompleter, DefaultHistory>::new()?;
    editor.set_helper(Some(ScreenCompleter::default()));

    while context.running {
        // The screen may have changed since the last line.
        if let Some(helper) = editor.helper_mut() {
            helper.set_commands(context.available_commands());
        }

        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if !is_sensitive(trimmed) {
                    editor.add_history_entry(trimmed).ok();
                }
                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                cli_io::print_info("Bye.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        match handle_line(context, &line?) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            cli_io::print_warning(format!("Could not parse `{line}`: {err}"));
            return Ok(LoopControl::Continue);
        }
    };

    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(command.clone());

    let control = context.dispatch(&command, raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// True when the line's command carries secrets, e.g. `PIN 4321`.
fn is_sensitive(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|word| {
            SENSITIVE_COMMANDS
                .iter()
                .any(|name| word.eq_ignore_ascii_case(name))
        })
}

/// Completes command names valid on the screen shown at the prompt.
#[derive(Default)]
struct ScreenCompleter {
    commands: Vec<&'static str>,
}

impl ScreenCompleter {
    fn set_commands(&mut self, mut commands: Vec<&'static str>) {
        commands.sort_unstable();
        commands.dedup();
        self.commands = commands;
    }

    fn candidates(&self, prefix: &str) -> Vec<&'static str> {
        let needle = prefix.to_ascii_lowercase();
        self.commands
            .iter()
            .copied()
            .filter(|name| name.starts_with(&needle))
            .collect()
    }
}

impl Completer for ScreenCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        // Arguments are free-form; only the command word completes.
        if prefix.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let pairs = self
            .candidates(prefix)
            .into_iter()
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((0, pairs))
    }
}

impl Hinter for ScreenCompleter {
    type Hint = String;
}

impl Highlighter for ScreenCompleter {}

impl Validator for ScreenCompleter {}

impl Helper for ScreenCompleter {}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::core::{FixedClock, Screen};

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

    fn completer_for(context: &ShellContext) -> ScreenCompleter {
        let mut completer = ScreenCompleter::default();
        completer.set_commands(context.available_commands());
        completer
    }

    #[test]
    fn completion_follows_the_current_screen() {
        let home = TempDir::new().unwrap();
        let mut ctx = context(&home);
        assert_eq!(ctx.screen(), Screen::Auth);

        let completer = completer_for(&ctx);
        assert!(completer.candidates("da").is_empty());
        assert_eq!(completer.candidates("LO"), vec!["login"]);
        assert!(completer.candidates("").contains(&"help"));

        handle_line(&mut ctx, "login").unwrap();
        handle_line(&mut ctx, "skip").unwrap();
        let completer = completer_for(&ctx);
        assert_eq!(completer.candidates("da"), vec!["dashboard"]);
        assert!(!completer.candidates("").contains(&"login"));
    }

    #[test]
    fn pin_lines_are_sensitive_in_any_case() {
        assert!(is_sensitive("pin 4321"));
        assert!(is_sensitive("PIN 4321"));
        assert!(is_sensitive("  Pin 12"));
        assert!(!is_sensitive("pinned"));
        assert!(!is_sensitive("dashboard"));
    }

    #[test]
    fn blank_comment_and_unbalanced_lines_are_skipped() {
        let home = TempDir::new().unwrap();
        let mut ctx = context(&home);
        assert_eq!(handle_line(&mut ctx, "").unwrap(), LoopControl::Continue);
        assert_eq!(handle_line(&mut ctx, "# login").unwrap(), LoopControl::Continue);
        assert_eq!(
            handle_line(&mut ctx, "cancel \"Adobe").unwrap(),
            LoopControl::Continue
        );
        assert_eq!(ctx.screen(), Screen::Auth);
        assert!(ctx.last_command.is_none());
    }

    #[test]
    fn exit_stops_the_loop() {
        let home = TempDir::new().unwrap();
        let mut ctx = context(&home);
        assert_eq!(handle_line(&mut ctx, "EXIT").unwrap(), LoopControl::Exit);
        assert!(!ctx.running);
    }
}
