use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::formatting::Formatter;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "status",
            "Show the current screen and session flags",
            "status",
            &[],
            cmd_status,
        ),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            &[],
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", &[], cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", &[], cmd_exit),
    ]
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let flags = context.controller.flags();
    let formatter = Formatter::new();
    formatter.print_header("Session");
    let screen = context.screen().to_string();
    formatter.print_two_column(&[
        ("Screen", screen.as_str()),
        ("Signed in", yes_no(flags.authenticated)),
        ("Onboarding done", yes_no(flags.onboarding_complete)),
        ("PIN set", yes_no(flags.pin_set())),
        ("Unlocked", yes_no(flags.pin_verified)),
        ("Biometrics", yes_no(flags.biometric_enabled)),
        ("Premium", yes_no(flags.is_premium)),
    ]);
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    let formatter = Formatter::new();
    formatter.print_header(format!("SubTrack {}", meta.version));
    let build = format!("{} ({})", meta.git_hash, meta.git_status);
    formatter.print_two_column(&[
        ("Build hash", build.as_str()),
        ("Built at", meta.timestamp),
        ("Target", meta.target),
        ("Profile", meta.profile),
        ("Rustc", meta.rustc),
    ]);
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.command(&name) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(args[0]),
        }
        return Ok(());
    }

    help::print_overview(&context.registry, context.screen());
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
