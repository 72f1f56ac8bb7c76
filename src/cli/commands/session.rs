//! Commands for the screens shown before the main app: sign-in,
//! onboarding and the PIN pads.

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::formatting::Formatter;
use crate::core::{PinOutcome, PinStep, Screen};
use crate::domain::pin::PIN_LENGTH;

const PIN_SCREENS: &[Screen] = &[Screen::PinVerify, Screen::PinSetup];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("login", "Sign in", "login", &[Screen::Auth], cmd_login),
        CommandEntry::new(
            "next",
            "Show the next onboarding slide",
            "next",
            &[Screen::Onboarding],
            cmd_next,
        ),
        CommandEntry::new(
            "skip",
            "Skip the onboarding",
            "skip",
            &[Screen::Onboarding],
            cmd_skip,
        ),
        CommandEntry::new(
            "pin",
            "Type PIN digits on the keypad",
            "pin <digits>",
            PIN_SCREENS,
            cmd_pin,
        ),
        CommandEntry::new(
            "backspace",
            "Delete the last PIN digit",
            "backspace",
            PIN_SCREENS,
            cmd_backspace,
        ),
        CommandEntry::new(
            "forgot",
            "Clear the PIN entry",
            "forgot",
            &[Screen::PinVerify],
            cmd_forgot,
        ),
        CommandEntry::new(
            "biometric",
            "Unlock with biometrics",
            "biometric",
            &[Screen::PinVerify],
            cmd_biometric,
        ),
    ]
}

fn cmd_login(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.complete_auth()?;
    io::print_success("Signed in.");
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.controller.onboarding_next()? == Screen::Onboarding {
        show_slide(context);
    } else {
        io::print_success("You're all set.");
    }
    Ok(())
}

fn cmd_skip(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.onboarding_skip()?;
    io::print_success("Onboarding skipped.");
    Ok(())
}

fn cmd_pin(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let digits: String = args.concat();
    if digits.is_empty() {
        return Err(CommandError::InvalidArguments("Usage: pin <digits>".into()));
    }
    if let Some(bad) = digits.chars().find(|ch| !ch.is_ascii_digit()) {
        return Err(CommandError::InvalidArguments(format!(
            "`{bad}` is not a digit; the keypad only has 0-9."
        )));
    }

    for key in digits.chars() {
        let outcome = context.controller.press_pin(key)?;
        match outcome {
            PinOutcome::Pending => {}
            PinOutcome::ConfirmRequested => {
                io::print_info("Repeat the PIN to confirm it.");
            }
            PinOutcome::Rejected => {
                io::print_warning("Incorrect PIN. Try again.");
            }
            PinOutcome::ConfirmationMismatch => {
                io::print_warning("PINs do not match. Re-enter the confirmation.");
            }
            PinOutcome::Verified => {
                io::print_success("PIN accepted.");
                return Ok(());
            }
            PinOutcome::Created(_) => {
                io::print_success("PIN saved.");
                return Ok(());
            }
        }
    }
    print_dots(context);
    Ok(())
}

fn cmd_backspace(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.pin_backspace()?;
    print_dots(context);
    Ok(())
}

fn cmd_forgot(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.forgot_pin()?;
    io::print_info("PIN entry cleared.");
    print_dots(context);
    Ok(())
}

fn cmd_biometric(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.controller.flags().biometric_enabled {
        return Err(CommandError::InvalidArguments(
            "Biometric unlock is turned off. Enable it with `biometrics on` after unlocking."
                .into(),
        ));
    }
    io::print_info("Simulating biometric check...");
    context.controller.biometric_unlock()?;
    io::print_success("Unlocked.");
    Ok(())
}

pub(crate) fn show_slide(context: &ShellContext) {
    let onboarding = context.controller.onboarding();
    let slide = onboarding.current_slide();
    output::section(format!(
        "{} ({}/{})",
        slide.title,
        onboarding.index() + 1,
        onboarding.total()
    ));
    io::print_info(slide.description);
    if onboarding.can_skip() {
        io::print_hint("Type `next` to continue or `skip` to jump in.");
    } else {
        io::print_hint("Type `next` to get started.");
    }
}

pub(crate) fn show_pin_pad(context: &ShellContext) {
    let screen = context.screen();
    let title = context
        .controller
        .pin_pad()
        .map(|pad| pad.title())
        .unwrap_or(if screen == Screen::PinSetup {
            "Create a PIN"
        } else {
            "Enter your PIN"
        });
    output::section(title);
    io::print_hint("Type `pin <digits>`; `backspace` deletes the last digit.");
    if screen == Screen::PinVerify {
        if context.controller.flags().biometric_enabled {
            io::print_hint("Type `biometric` to unlock with biometrics.");
        }
        io::print_hint("Forgot it? `forgot` clears the entry.");
    }
}

fn print_dots(context: &ShellContext) {
    if let Some(pad) = context.controller.pin_pad() {
        let formatter = Formatter::new();
        let step = match pad.step() {
            PinStep::Confirm => " (repeat)",
            PinStep::Enter => "",
        };
        io::print_info(format!(
            "{}{}  {}",
            pad.title(),
            step,
            formatter.pin_dots(pad.filled(), PIN_LENGTH)
        ));
    }
}
