//! Console rendering of generator progress and run summaries

use colored::Colorize;

use crate::generator::provisioning::ProvisionReport;
use crate::generator::site_collections::SiteCollectionReport;
use crate::generator::{PhaseOutcome, Progress, RunSummary};

/// Prints phase headers and step messages, mirroring them to the log
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    total: usize,
    step: usize,
}

impl Progress for ConsoleProgress {
    fn overall(&mut self, title: &str, total: usize) {
        log::info!("{} ({})", title, total);
        self.total = total;
        self.step = 0;
        println!("\n{} {}", "▶".cyan(), title.bold());
    }

    fn detail(&mut self, message: &str) {
        log::debug!("{}", message);
        self.step += 1;
        if self.total > 0 {
            println!("  [{}/{}] {}", self.step.min(self.total), self.total, message.dimmed());
        } else {
            println!("  {}", message.dimmed());
        }
    }
}

fn provision_line(label: &str, outcome: &PhaseOutcome<ProvisionReport>) -> String {
    match outcome {
        PhaseOutcome::Skipped => format!("  {} {}: nothing requested", "○".dimmed(), label),
        PhaseOutcome::Completed(r) => {
            let mark = if r.failed == 0 { "✓".green() } else { "⚠".yellow() };
            format!(
                "  {} {}: {}/{} created, {} failed, {} commits",
                mark, label, r.succeeded, r.requested, r.failed, r.commits
            )
        }
        PhaseOutcome::Aborted { report, error } => format!(
            "  {} {}: aborted after {}/{} ({})",
            "✗".red(),
            label,
            report.succeeded,
            report.requested,
            error
        ),
    }
}

fn site_line(outcome: &PhaseOutcome<SiteCollectionReport>) -> String {
    match outcome {
        PhaseOutcome::Skipped => format!("  {} Site collections: nothing requested", "○".dimmed()),
        PhaseOutcome::Completed(r) if r.requested == 0 => {
            format!("  {} Site collections: using existing site collection", "✓".green())
        }
        PhaseOutcome::Completed(r) => {
            let mark = if r.failed == 0 { "✓".green() } else { "⚠".yellow() };
            format!(
                "  {} Site collections: {}/{} created, {} failed",
                mark, r.created, r.requested, r.failed
            )
        }
        PhaseOutcome::Aborted { error, .. } => format!("  {} Site collections: aborted ({})", "✗".red(), error),
    }
}

pub fn print_run_summary(summary: &RunSummary) {
    println!("\n{}", "Run summary".bold());
    println!("===========");
    println!("{}", provision_line("Users", &summary.users));
    println!("{}", provision_line("Groups", &summary.groups));
    println!("{}", site_line(&summary.site_collections));

    if !summary.working_site_collections.is_empty() {
        println!("\nWorking site collections:");
        for site in &summary.working_site_collections {
            println!("  {}", site.url);
        }
    }
}
