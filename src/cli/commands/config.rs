use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::formatting::Formatter;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change shell preferences",
        "config [show | set <key> <value>]",
        &[],
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show(context);
            Ok(())
        }
        ["set", key, value] => {
            let mut updated = context.config.clone();
            updated.set(key, value)?;
            context.config_manager.save(&updated)?;
            context.config = updated;
            io::apply_config(&context.config);
            io::print_success(format!("`{key}` set to `{value}`."));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "Usage: config [show | set <key> <value>]".into(),
        )),
    }
}

fn show(context: &ShellContext) {
    let formatter = Formatter::new();
    formatter.print_header("Configuration");
    let entries = context.config.entries();
    let rows: Vec<(&str, &str)> = entries
        .iter()
        .map(|(key, value)| (*key, value.as_str()))
        .collect();
    formatter.print_two_column(&rows);
    io::print_info(format!("Stored at {}", context.config_manager.path().display()));
}
