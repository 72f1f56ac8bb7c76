use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::core::Screen;

pub fn print_overview(registry: &CommandRegistry, screen: Screen) {
    output_section(format!("Available commands ({screen})"));
    for entry in registry.list_for(screen) {
        io::print_info(format!("  {:<14} {}", entry.name, entry.description));
    }
    io::print_hint("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  Description: {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
    if !entry.screens.is_empty() {
        let screens: Vec<_> = entry.screens.iter().map(Screen::label).collect();
        io::print_info(format!("  Screens: {}", screens.join(", ")));
    }
}
