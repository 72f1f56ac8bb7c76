use std::fmt;

use colored::Colorize;

use crate::cli::output::{current_preferences, OutputPreferences};
use crate::core::services::PaymentStatus;

const BAR_WIDTH: usize = 20;

pub struct Formatter {
    prefs: OutputPreferences,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    pub fn with_preferences(prefs: OutputPreferences) -> Self {
        Self { prefs }
    }

    fn plain(&self) -> bool {
        !self.prefs.color_enabled || self.prefs.screen_reader_mode
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.header_text(title));
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        let text = format!("=== {} ===", title);
        if self.plain() {
            text
        } else {
            text.bold().to_string()
        }
    }

    pub fn print_two_column(&self, entries: &[(&str, &str)]) {
        let width = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        for (label, value) in entries {
            println!("{}", self.two_column_row(label, value, width));
        }
    }

    pub fn two_column_row(&self, label: &str, value: &str, width: usize) -> String {
        format!("  {:<width$}  {}", label, value, width = width)
    }

    /// Status badge for an upcoming payment, e.g. `[3d]`.
    pub fn status_badge(&self, status: PaymentStatus, days: i64) -> String {
        let badge = format!("[{days}d]");
        if self.prefs.screen_reader_mode {
            return format!("{badge} {status}");
        }
        if self.plain() {
            return badge;
        }
        match status {
            PaymentStatus::Urgent => badge.bright_red().to_string(),
            PaymentStatus::Soon => badge.yellow().to_string(),
            PaymentStatus::Ok => badge.green().to_string(),
        }
    }

    /// Fixed-width share bar, e.g. `[#####---------------]`.
    pub fn share_bar(&self, percentage: f64) -> String {
        let clamped = percentage.clamp(0.0, 100.0);
        let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
        format!(
            "[{}{}]",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled)
        )
    }

    /// Keypad progress dots for the PIN screens.
    pub fn pin_dots(&self, filled: usize, total: usize) -> String {
        if self.prefs.screen_reader_mode {
            return format!("{filled} of {total} digits entered");
        }
        let mut dots = String::new();
        for idx in 0..total {
            if idx > 0 {
                dots.push(' ');
            }
            dots.push(if idx < filled { '●' } else { '○' });
        }
        dots
    }
}
