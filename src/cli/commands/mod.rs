pub mod config;
pub mod dashboard;
pub mod session;
pub mod settings;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "login",
    "next",
    "skip",
    "pin",
    "backspace",
    "forgot",
    "biometric",
    "dashboard",
    "subscriptions",
    "stats",
    "cancel",
    "premium",
    "biometrics",
    "set-pin",
    "lock",
    "logout",
    "config",
    "status",
    "help",
    "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(session::definitions());
    commands.extend(dashboard::definitions());
    commands.extend(settings::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}

/// Parses an `on`/`off` style argument.
pub(crate) fn parse_toggle(args: &[&str], usage: &str) -> Result<bool, CommandError> {
    match args {
        [value] => crate::config::parse_switch("value", value)
            .map_err(|_| CommandError::InvalidArguments(format!("Usage: {usage}"))),
        _ => Err(CommandError::InvalidArguments(format!("Usage: {usage}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_has_a_fixed_position() {
        for entry in all_entries() {
            assert!(
                ROOT_COMMAND_ORDER.contains(&entry.name),
                "`{}` missing from ROOT_COMMAND_ORDER",
                entry.name
            );
        }
    }

    #[test]
    fn toggle_accepts_on_off() {
        assert!(parse_toggle(&["on"], "x on|off").unwrap());
        assert!(!parse_toggle(&["OFF"], "x on|off").unwrap());
        assert!(parse_toggle(&[], "x on|off").is_err());
        assert!(parse_toggle(&["sideways"], "x on|off").is_err());
    }
}
