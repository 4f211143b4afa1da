use std::sync::Arc;

use colored::*;
use tracing::{info, warn};

use shelfscan_common::config::Config;
use shelfscan_common::scan::device::Facing;
use shelfscan_common::scan::mode::ScanMode;
use shelfscan_common::scan::payload::{RawCapturePayload, SourceType};
use shelfscan_common::scan::result::ScanResult;
use shelfscan_common::scan::technology::ScanTechnology;
use shelfscan_core::device::SimulatedCamera;
use shelfscan_core::fixtures;
use shelfscan_core::ledger::{ScanFilter, ScanLedger};
use shelfscan_core::session::ScanRequest;
use shelfscan_core::station::{CaptureOutcome, ScanStation};

use crate::commands::{attribution, build_station, history, verify};
use crate::terminal::{format, print};

const HISTORY_SHOWN: usize = 6;

enum Step {
    Capture {
        mode: ScanMode,
        technology: ScanTechnology,
        payload: RawCapturePayload,
    },
    CancelWhileActive,
    OpenFrontCamera,
}

fn script() -> Vec<Step> {
    vec![
        Step::Capture {
            mode: ScanMode::Receipt,
            technology: ScanTechnology::QrCode,
            payload: RawCapturePayload::new("PRD-2024-008", "BATCH-H04", SourceType::Product),
        },
        Step::CancelWhileActive,
        Step::Capture {
            mode: ScanMode::Transfer,
            technology: ScanTechnology::Barcode,
            payload: RawCapturePayload::new("PRD-2024-002", "BATCH-B08", SourceType::Transfer),
        },
        Step::OpenFrontCamera,
        Step::Capture {
            mode: ScanMode::Shipping,
            technology: ScanTechnology::Rfid,
            payload: RawCapturePayload::new("PRD-2024-007", "BATCH-G12", SourceType::Order),
        },
    ]
}

/// One shift on a handheld whose front camera is broken.
pub async fn demo(cfg: &Config) -> anyhow::Result<()> {
    let ledger = Arc::new(ScanLedger::with_history(fixtures::sample_history()));
    let camera = SimulatedCamera::with_inputs([Facing::Rear]);
    let station = build_station(Arc::new(camera), ledger.clone(), cfg);

    for step in script() {
        run_step(&station, step, cfg).await?;
    }

    let query = ledger.query(ScanFilter::new());
    let latest: Vec<&ScanResult> = query.iter().take(HISTORY_SHOWN).collect();
    history::print_history(&latest, cfg);
    format::print_metrics(&ledger.metrics(), cfg);
    print::fat_separator();
    Ok(())
}

async fn run_step(station: &ScanStation, step: Step, cfg: &Config) -> anyhow::Result<()> {
    match step {
        Step::Capture {
            mode,
            technology,
            payload,
        } => {
            station.start(ScanRequest::new(mode, technology, Facing::Rear, attribution(cfg)))?;
            if let CaptureOutcome::Recorded(report) = verify(station, payload).await? {
                let status = if report.result.is_verified() {
                    "verified".green()
                } else {
                    "failed".red()
                };
                info!("{} {} -> {status}", mode, report.result.product_id());
                format::print_actions(&report.actions);
            }
        }
        Step::CancelWhileActive => {
            let request = ScanRequest::new(
                ScanMode::Inventory,
                ScanTechnology::Manual,
                Facing::Rear,
                attribution(cfg),
            );
            station.start(request)?;
            station.cancel()?;
            info!("Session cancelled before capture, nothing recorded");
        }
        Step::OpenFrontCamera => {
            let request = ScanRequest::new(
                ScanMode::Verification,
                ScanTechnology::QrCode,
                Facing::Front,
                attribution(cfg),
            );
            if let Err(err) = station.start(request) {
                warn!("{err}");
            }
        }
    }
    Ok(())
}
