use shelfscan_common::config::Config;
use shelfscan_core::fixtures;
use shelfscan_core::ledger::ScanLedger;

use crate::terminal::{format, print};

pub fn stats(json: bool, cfg: &Config) -> anyhow::Result<()> {
    let ledger = ScanLedger::with_history(fixtures::sample_history());
    let metrics = ledger.metrics();

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    format::print_metrics(&metrics, cfg);
    print::fat_separator();
    Ok(())
}
