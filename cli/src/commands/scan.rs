use std::sync::Arc;

use anyhow::Context;
use tracing::warn;

use shelfscan_common::config::Config;
use shelfscan_common::scan::payload::RawCapturePayload;
use shelfscan_core::device::SimulatedCamera;
use shelfscan_core::ledger::ScanLedger;
use shelfscan_core::session::ScanRequest;
use shelfscan_core::station::CaptureOutcome;

use crate::commands::{ScanArgs, attribution, build_station, verify};
use crate::terminal::{format, print};

pub async fn scan(args: ScanArgs, cfg: &Config) -> anyhow::Result<()> {
    let camera = if args.deny_camera {
        SimulatedCamera::new().deny_permission()
    } else {
        SimulatedCamera::new()
    };
    let ledger = Arc::new(ScanLedger::new());
    let station = build_station(Arc::new(camera), ledger.clone(), cfg);

    let mut request = ScanRequest::new(args.mode, args.technology, args.facing, attribution(cfg));
    request.notes = args.notes;

    station.start(request).context("could not start the scan")?;

    if let Some(facing) = args.switch_to {
        station
            .switch_facing(facing)
            .with_context(|| format!("could not switch to the {facing} camera"))?;
    }

    let payload = RawCapturePayload::new(args.product, args.batch, args.source);
    match verify(&station, payload).await? {
        CaptureOutcome::Recorded(report) => {
            print::header("scan recorded", cfg.quiet);
            format::print_result(0, &report.result, cfg);
            format::print_actions(&report.actions);
            format::print_metrics(&ledger.metrics(), cfg);
        }
        CaptureOutcome::Discarded => warn!("Nothing recorded"),
    }

    print::fat_separator();
    Ok(())
}
