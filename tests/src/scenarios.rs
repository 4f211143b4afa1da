use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use shelfscan_common::scan::action::ScanAction;
use shelfscan_common::scan::device::Facing;
use shelfscan_common::scan::mode::ScanMode;
use shelfscan_common::scan::payload::{RawCapturePayload, SourceType};
use shelfscan_common::scan::result::{Attribution, ScanId, ScanResult};
use shelfscan_common::scan::state::SessionState;
use shelfscan_common::scan::technology::ScanTechnology;
use shelfscan_common::scan::verification::VerificationOutcome;
use shelfscan_common::ScanError;
use shelfscan_core::ledger::{ScanFilter, ScanLedger};
use shelfscan_core::router;
use shelfscan_core::station::CaptureOutcome;

use crate::support::{self, CountingCamera, ScriptedVerifier};

async fn run_inventory_scan(outcome: VerificationOutcome) -> (ScanResult, BTreeSet<ScanAction>) {
    let camera = Arc::new(CountingCamera::default());
    let verifier = Arc::new(ScriptedVerifier::new([outcome]));
    let station = support::station(camera.clone(), verifier);

    station
        .start(support::request(ScanMode::Inventory, ScanTechnology::QrCode))
        .unwrap();
    assert_eq!(station.state(), SessionState::Active);

    let captured = station
        .capture(RawCapturePayload::new("P1", "B1", SourceType::Product))
        .await
        .unwrap();
    camera.assert_each_released_once();

    match captured {
        CaptureOutcome::Recorded(report) => {
            assert_eq!(station.ledger().len(), 1);
            (report.result, report.actions)
        }
        CaptureOutcome::Discarded => panic!("scan was not recorded"),
    }
}

#[tokio::test]
async fn verified_inventory_scan_offers_an_inventory_update() {
    let (result, actions) = run_inventory_scan(VerificationOutcome::verified("ref-123")).await;

    assert_eq!(result.mode(), ScanMode::Inventory);
    assert!(result.is_verified());
    assert_eq!(result.verification().reference(), Some("ref-123"));
    assert_eq!(actions, BTreeSet::from([ScanAction::UpdateInventory]));
    assert_eq!(router::actions_for(&result), actions);
}

#[tokio::test]
async fn rejected_inventory_scan_is_recorded_without_follow_up() {
    let (result, actions) = run_inventory_scan(VerificationOutcome::rejected()).await;

    assert!(!result.is_verified());
    assert_eq!(result.verification().reference(), None);
    assert_eq!(actions, BTreeSet::from([ScanAction::NoFurtherAction]));
}

#[tokio::test]
async fn cancelling_an_active_session_records_nothing() {
    let camera = Arc::new(CountingCamera::default());
    let station = support::station(camera.clone(), Arc::new(ScriptedVerifier::default()));

    station
        .start(support::request(ScanMode::Transfer, ScanTechnology::Barcode))
        .unwrap();
    station.cancel().unwrap();

    assert_eq!(station.state(), SessionState::Cancelled);
    assert!(station.ledger().is_empty());
    camera.assert_each_released_once();

    let late = station.capture(support::payload("P1", "B1")).await;
    assert_eq!(
        late.unwrap_err(),
        ScanError::invalid_state("capture", SessionState::Cancelled)
    );
    assert!(station.ledger().is_empty());
}

#[tokio::test]
async fn unavailable_camera_fails_the_session_without_history() {
    let err = ScanError::DeviceUnavailable {
        facing: Facing::Rear,
    };
    let camera = Arc::new(CountingCamera::failing(err.clone()));
    let station = support::station(camera.clone(), Arc::new(ScriptedVerifier::default()));

    let started = station.start(support::request(ScanMode::Shipping, ScanTechnology::Rfid));

    assert_eq!(started, Err(err.clone()));
    assert!(started.unwrap_err().is_device_error());
    assert_eq!(station.state(), SessionState::Failed);
    assert_eq!(station.last_device_error(), Some(err));
    assert!(station.ledger().is_empty());
    assert_eq!(camera.live_feeds(), 0);

    // A failed session is terminal, so the next attempt may start right away.
    let retry = station.start(support::request(ScanMode::Shipping, ScanTechnology::Rfid));
    assert!(retry.is_err());
    assert!(station.ledger().is_empty());
}

#[test]
fn technology_filter_returns_matching_entries_newest_first() {
    let base = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
    let technologies = [
        ScanTechnology::Rfid,
        ScanTechnology::QrCode,
        ScanTechnology::Rfid,
        ScanTechnology::Barcode,
        ScanTechnology::Rfid,
        ScanTechnology::Manual,
    ];

    let ledger = ScanLedger::new();
    for (minute, technology) in technologies.into_iter().enumerate() {
        ledger.append(ScanResult::new(
            ScanId::new(format!("SCN-{minute}")),
            base + Duration::minutes(minute as i64),
            RawCapturePayload::new(format!("PRD-{minute}"), "BATCH-1", SourceType::Product),
            technology,
            ScanMode::Receipt,
            Attribution::new("Emily Davis", "Receiving Area"),
            VerificationOutcome::verified(format!("0x{minute}")),
            None,
        ));
    }

    let query = ledger.query(ScanFilter::new().technology(ScanTechnology::Rfid));
    let found: Vec<&ScanResult> = query.iter().collect();

    assert_eq!(found.len(), 3);
    assert!(found.iter().all(|r| r.technology() == ScanTechnology::Rfid));
    assert!(found
        .windows(2)
        .all(|pair| pair[0].captured_at() > pair[1].captured_at()));
    assert_eq!(found[0].id().as_str(), "SCN-4");
}
