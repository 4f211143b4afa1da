use std::collections::BTreeSet;

use colored::*;

use shelfscan_common::config::Config;
use shelfscan_common::scan::action::ScanAction;
use shelfscan_common::scan::metrics::ScanMetrics;
use shelfscan_common::scan::result::ScanResult;
use shelfscan_common::scan::verification::VerificationOutcome;

use crate::terminal::{colors, print};

type Detail = (String, ColoredString);

pub fn result_to_details(result: &ScanResult) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        detail("Product", result.product_id().normal()),
        detail("Batch", result.batch_number().normal()),
        detail("Source", result.source().to_string().normal()),
        detail("Tech", result.technology().to_string().normal()),
        detail("Mode", result.mode().to_string().normal()),
        detail("Operator", result.performed_by().normal()),
        detail("Location", result.location().normal()),
        detail(
            "Captured",
            result
                .captured_at()
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
                .normal(),
        ),
    ];

    details.push(status_detail(result.verification()));
    if let Some(reference) = result.verification().reference() {
        details.push(detail("Reference", shorten(reference).color(colors::REFERENCE)));
    }
    if let Some(notes) = result.notes() {
        details.push(detail("Notes", notes.italic()));
    }
    details
}

fn status_detail(verification: &VerificationOutcome) -> Detail {
    let value = match verification {
        VerificationOutcome::Verified { .. } => "Verified".color(colors::VERIFIED).bold(),
        VerificationOutcome::Rejected { reason } => {
            format!("Failed ({reason})").color(colors::FAILED).bold()
        }
    };
    detail("Status", value)
}

fn detail(key: &str, value: ColoredString) -> Detail {
    (key.to_string(), value)
}

/// `0x7a3f9c…2d5a7f` for long transaction references.
fn shorten(reference: &str) -> String {
    if reference.len() <= 18 || !reference.is_ascii() {
        return reference.to_string();
    }
    format!("{}…{}", &reference[..8], &reference[reference.len() - 6..])
}

pub fn print_result(idx: usize, result: &ScanResult, cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }
    print::tree_head(idx, result.id().as_str());
    if cfg.quiet == 0 {
        print::as_tree_one_level(result_to_details(result));
    }
}

pub fn print_actions(actions: &BTreeSet<ScanAction>) {
    let joined: String = actions
        .iter()
        .map(ScanAction::to_string)
        .collect::<Vec<String>>()
        .join(", ");
    print::aligned_line("Next", joined.color(colors::ACCENT).bold());
}

pub fn print_metrics(metrics: &ScanMetrics, cfg: &Config) {
    print::header("scan metrics", cfg.quiet);
    print::aligned_line("Total", metrics.total.to_string().bold());
    print::aligned_line("Verified", metrics.verified.to_string().color(colors::VERIFIED));
    print::aligned_line("Failed", metrics.failed.to_string().color(colors::FAILED));
    print::aligned_line(
        "Rate",
        format!("{:.1}%", metrics.verification_rate() * 100.0).bold(),
    );

    if cfg.quiet > 0 {
        return;
    }
    for (technology, count) in &metrics.by_technology {
        print::aligned_line(&technology.to_string(), count);
    }
    for (mode, count) in &metrics.by_mode {
        print::aligned_line(&mode.to_string(), count);
    }
    for (action, count) in &metrics.by_action {
        print::aligned_line(&action.to_string(), count);
    }
}
