use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::formatting::Formatter;
use crate::core::services::{CancellationGuidance, CancellationService, SummaryService};
use crate::core::Screen;
use crate::currency::format_base;
use crate::domain::{catalog, Displayable};

const MAIN: &[Screen] = &[Screen::Main];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dashboard",
            "Totals and upcoming payments",
            "dashboard",
            MAIN,
            cmd_dashboard,
        ),
        CommandEntry::new(
            "subscriptions",
            "All subscriptions grouped by category",
            "subscriptions",
            MAIN,
            cmd_subscriptions,
        ),
        CommandEntry::new(
            "stats",
            "Monthly spend per category",
            "stats",
            MAIN,
            cmd_stats,
        ),
        CommandEntry::new(
            "cancel",
            "How to cancel a subscription",
            "cancel <name|id>",
            MAIN,
            cmd_cancel,
        ),
    ]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let now = context.clock.now();
    let summary = SummaryService::dashboard(&context.subscriptions, now);
    let formatter = Formatter::new();

    formatter.print_header("Overview");
    let monthly = format_base(summary.monthly_total);
    let yearly = format_base(summary.yearly_total);
    let count = summary.count.to_string();
    formatter.print_two_column(&[
        ("Per month", monthly.as_str()),
        ("Per year", yearly.as_str()),
        ("Subscriptions", count.as_str()),
    ]);

    formatter.print_header("Upcoming payments");
    for payment in &summary.upcoming {
        let sub = payment.subscription;
        io::print_info(format!(
            "  {:<22} {:>8} {:<4} {:<10} {} {}",
            sub.name,
            sub.cost,
            sub.currency,
            sub.period,
            formatter.status_badge(payment.status, payment.days_until),
            sub.next_payment.format("%d.%m.%Y"),
        ));
    }
    Ok(())
}

fn cmd_subscriptions(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let formatter = Formatter::new();
    for (category, members) in SummaryService::group_by_category(&context.subscriptions) {
        formatter.print_header(format!("{} ({})", category, members.len()));
        for sub in members {
            io::print_info(format!(
                "  [{}] {:<22} {} {}/{}",
                sub.id,
                sub.name,
                sub.cost,
                sub.currency,
                sub.period.short_label()
            ));
        }
    }
    Ok(())
}

fn cmd_stats(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let formatter = Formatter::new();
    formatter.print_header("Spending by category");
    for entry in SummaryService::category_breakdown(&context.subscriptions) {
        io::print_info(format!(
            "  {:<10} {:>12} {} {:>5.1}%",
            entry.category.to_string(),
            format_base(entry.monthly_total),
            formatter.share_bar(entry.percentage),
            entry.percentage
        ));
    }
    if !context.controller.flags().is_premium {
        io::print_info("Trend charts are available in Premium.");
    }
    Ok(())
}

fn cmd_cancel(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = if args.is_empty() {
        if context.mode == CliMode::Script {
            return Err(CommandError::InvalidArguments(
                "Usage: cancel <name|id>".into(),
            ));
        }
        let labels: Vec<String> = context
            .subscriptions
            .iter()
            .map(Displayable::display_label)
            .collect();
        match io::select_item(&context.theme, "Which subscription?", &labels)? {
            Some(idx) => context.subscriptions[idx].id.clone(),
            None => return Ok(()),
        }
    } else {
        args.join(" ")
    };

    let subscription = catalog::find(&context.subscriptions, &query)?;
    let formatter = Formatter::new();
    match CancellationService::guidance(subscription, context.controller.flags().is_premium) {
        CancellationGuidance::Upsell { features } => {
            formatter.print_header("Premium feature");
            io::print_info("Quick cancellation is available in Premium.");
            io::print_info("Premium includes:");
            for feature in features {
                io::print_info(format!("  - {feature}"));
            }
            io::print_hint("Type `premium on` to upgrade.");
        }
        CancellationGuidance::AppStore {
            subscription,
            steps,
        } => {
            formatter.print_header(format!("Cancel {subscription} (App Store)"));
            io::print_info("This subscription is billed through App Store / Google Play.");
            print_steps(&steps);
        }
        CancellationGuidance::Website {
            subscription,
            steps,
            url,
        } => {
            formatter.print_header(format!("Cancel {subscription} (website)"));
            io::print_info("This subscription is billed through the service's website.");
            print_steps(&steps);
            io::print_info(format!("Cancellation page: {url}"));
        }
    }
    Ok(())
}

fn print_steps(steps: &[String]) {
    for (idx, step) in steps.iter().enumerate() {
        io::print_info(format!("  {}. {}", idx + 1, step));
    }
}
