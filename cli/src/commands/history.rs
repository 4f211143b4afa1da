use shelfscan_common::config::Config;
use shelfscan_common::scan::result::ScanResult;
use shelfscan_core::fixtures;
use shelfscan_core::ledger::{ScanFilter, ScanLedger};

use crate::commands::HistoryArgs;
use crate::terminal::{format, print};

pub fn history(args: HistoryArgs, cfg: &Config) -> anyhow::Result<()> {
    let ledger = ScanLedger::with_history(fixtures::sample_history());
    let limit = args.limit.unwrap_or(usize::MAX);
    let json = args.json;

    let query = ledger.query(to_filter(args));
    let results: Vec<&ScanResult> = query.iter().take(limit).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    print_history(&results, cfg);
    Ok(())
}

pub fn print_history(results: &[&ScanResult], cfg: &Config) {
    print::header("scan history", cfg.quiet);
    if results.is_empty() {
        print::no_results();
        return;
    }
    for (idx, result) in results.iter().enumerate() {
        format::print_result(idx, result, cfg);
    }
    print::aligned_line("Shown", results.len());
}

fn to_filter(args: HistoryArgs) -> ScanFilter {
    let mut filter = ScanFilter::new();
    if let Some(technology) = args.technology {
        filter = filter.technology(technology);
    }
    if let Some(mode) = args.mode {
        filter = filter.mode(mode);
    }
    if args.verified {
        filter = filter.verified(true);
    } else if args.failed {
        filter = filter.verified(false);
    }
    if let Some(search) = args.search {
        filter = filter.text(search);
    }
    if let Some(since) = args.since {
        filter = filter.since(since);
    }
    if let Some(until) = args.until {
        filter = filter.until(until);
    }
    filter
}
