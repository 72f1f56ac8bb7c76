use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::Screen;

use super::parse_toggle;

const MAIN: &[Screen] = &[Screen::Main];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "premium",
            "Switch Premium on or off for this session",
            "premium on|off",
            MAIN,
            cmd_premium,
        ),
        CommandEntry::new(
            "biometrics",
            "Allow biometric unlock on the PIN screen",
            "biometrics on|off",
            MAIN,
            cmd_biometrics,
        ),
        CommandEntry::new(
            "set-pin",
            "Create or change the app PIN",
            "set-pin",
            &[Screen::Main, Screen::PinSetup],
            cmd_set_pin,
        ),
        CommandEntry::new("lock", "Lock the app", "lock", MAIN, cmd_lock),
        CommandEntry::new("logout", "Sign out", "logout", MAIN, cmd_logout),
    ]
}

fn cmd_premium(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let enabled = parse_toggle(args, "premium on|off")?;
    context.controller.set_premium(enabled);
    if enabled {
        io::print_success("Premium unlocked for this session.");
    } else {
        io::print_info("Back on the free plan.");
    }
    Ok(())
}

fn cmd_biometrics(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let enabled = parse_toggle(args, "biometrics on|off")?;
    context.controller.set_biometric(enabled)?;
    io::print_success(if enabled {
        "Biometric unlock enabled."
    } else {
        "Biometric unlock disabled."
    });
    Ok(())
}

/// Starts PIN setup; run again from the setup pad to abandon it.
fn cmd_set_pin(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.screen() == Screen::PinSetup {
        context.controller.cancel_pin_setup()?;
        io::print_info("PIN setup cancelled.");
    } else {
        context.controller.begin_pin_setup()?;
    }
    Ok(())
}

fn cmd_lock(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let screen = context.controller.lock()?;
    if screen == Screen::Main {
        io::print_warning("No PIN is set, so the app stays open. Use `set-pin` first.");
    }
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.sign_out()?;
    io::print_success("Signed out.");
    Ok(())
}
