//! User-facing output: warnings, plan rendering and the final summary

use console::Style;

use crate::installer::{ExecutionReport, InstallAction, InstallationDecision};
use crate::target::InstallTarget;

/// Print a non-fatal, item-scoped warning
pub fn warn(message: &str) {
    eprintln!(
        "{} {message}",
        Style::new().yellow().bold().apply_to("warning:")
    );
}

/// Render the decision list of a dry run. No writes happen; the plan itself
/// is the output.
pub fn render_plan(decisions: &[InstallationDecision], target: InstallTarget) {
    if decisions.is_empty() {
        println!("Nothing to install.");
        return;
    }

    println!(
        "Planned actions for the {} target:",
        Style::new().bold().apply_to(target.label())
    );
    for decision in decisions {
        let line = match decision.action {
            InstallAction::Install => format!(
                "{} {}",
                Style::new().green().apply_to("install"),
                decision.dest_display()
            ),
            InstallAction::SkipExisting => format!(
                "{} {} (already exists, use --force to overwrite)",
                Style::new().yellow().apply_to("skip"),
                decision.dest_display()
            ),
            InstallAction::Overwrite => format!(
                "{} {}",
                Style::new().cyan().apply_to("overwrite"),
                decision.dest_display()
            ),
        };
        println!("[DRY RUN] {line}");
    }
}

/// Print the final summary: installed, skipped and overwritten items are
/// always listed distinctly, even when some items failed individually.
pub fn print_summary(report: &ExecutionReport, target: InstallTarget) {
    println!();

    print_group(
        "Installed",
        &report.installed,
        &Style::new().green().bold(),
        "+",
    );
    print_group(
        "Overwritten",
        &report.overwritten,
        &Style::new().cyan().bold(),
        "~",
    );
    print_group(
        "Skipped (already installed)",
        &report.skipped,
        &Style::new().yellow().bold(),
        "-",
    );
    print_group("Failed", &report.failed, &Style::new().red().bold(), "!");

    println!(
        "{} installed, {} overwritten, {} skipped to the {} target",
        report.installed.len(),
        report.overwritten.len(),
        report.skipped.len(),
        target.label()
    );
}

fn print_group(
    label: &str,
    decisions: &[InstallationDecision],
    style: &Style,
    marker: &str,
) {
    if decisions.is_empty() {
        return;
    }
    println!("{} ({}):", style.apply_to(label), decisions.len());
    for decision in decisions {
        println!(
            "  {marker} {}",
            Style::new().dim().apply_to(decision.dest_display())
        );
    }
    println!();
}
