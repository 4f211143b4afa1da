use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use shelfscan_common::scan::device::Facing;
use shelfscan_common::scan::mode::ScanMode;
use shelfscan_common::scan::state::SessionState;
use shelfscan_common::scan::technology::ScanTechnology;
use shelfscan_common::scan::verification::{RejectionReason, VerificationOutcome};
use shelfscan_common::ScanError;
use shelfscan_core::device::{CaptureDevice, SimulatedCamera};
use shelfscan_core::fixtures;
use shelfscan_core::ledger::{ScanFilter, ScanLedger};
use shelfscan_core::station::CaptureOutcome;

use crate::support::{self, CountingCamera, GatedVerifier, ScriptedVerifier, SilentVerifier};

#[tokio::test]
async fn late_outcome_after_cancel_is_discarded() {
    let camera = Arc::new(CountingCamera::default());
    let verifier = Arc::new(GatedVerifier::new(VerificationOutcome::verified("0xlate")));
    let station = Arc::new(support::station(camera.clone(), verifier.clone()));

    station
        .start(support::request(ScanMode::Inventory, ScanTechnology::QrCode))
        .unwrap();

    let capturing = {
        let station = station.clone();
        tokio::spawn(async move { station.capture(support::payload("P1", "B1")).await })
    };

    while station.state() != SessionState::Verifying {
        tokio::task::yield_now().await;
    }

    station.cancel().unwrap();
    assert_eq!(station.state(), SessionState::Cancelled);
    camera.assert_each_released_once();

    verifier.open();
    let outcome = capturing.await.unwrap().unwrap();

    assert!(matches!(outcome, CaptureOutcome::Discarded));
    assert_eq!(station.state(), SessionState::Cancelled);
    assert!(station.ledger().is_empty());
    camera.assert_each_released_once();
}

#[tokio::test]
async fn start_during_verification_is_refused() {
    let camera = Arc::new(CountingCamera::default());
    let verifier = Arc::new(GatedVerifier::new(VerificationOutcome::rejected()));
    let station = Arc::new(support::station(camera.clone(), verifier.clone()));

    station
        .start(support::request(ScanMode::Receipt, ScanTechnology::Rfid))
        .unwrap();
    let capturing = {
        let station = station.clone();
        tokio::spawn(async move { station.capture(support::payload("P2", "B2")).await })
    };
    while station.state() != SessionState::Verifying {
        tokio::task::yield_now().await;
    }

    assert_eq!(
        station.start(support::request(ScanMode::Receipt, ScanTechnology::Rfid)),
        Err(ScanError::SessionInProgress {
            state: SessionState::Verifying
        })
    );
    assert_eq!(camera.acquisitions(), 1);

    verifier.open();
    let outcome = capturing.await.unwrap().unwrap();
    let CaptureOutcome::Recorded(report) = outcome else {
        panic!("expected the failed verification to be recorded");
    };
    assert!(!report.result.is_verified());
    assert_eq!(station.state(), SessionState::Failed);
    camera.assert_each_released_once();
}

#[tokio::test]
async fn verification_timeout_is_recorded_as_a_failure() {
    let camera = Arc::new(CountingCamera::default());
    let station = support::station_with_timeout(
        camera.clone(),
        Arc::new(SilentVerifier),
        Duration::from_millis(20),
    );

    station
        .start(support::request(ScanMode::Shipping, ScanTechnology::Barcode))
        .unwrap();
    let outcome = station
        .capture(support::payload("P3", "B3"))
        .await
        .unwrap();

    let CaptureOutcome::Recorded(report) = outcome else {
        panic!("expected the timeout to be recorded");
    };
    assert_eq!(
        report.result.verification().rejection_reason(),
        Some(RejectionReason::Timeout)
    );
    assert_eq!(station.state(), SessionState::Failed);
    assert_eq!(station.ledger().metrics().failed, 1);
    camera.assert_each_released_once();
}

#[tokio::test]
async fn capture_time_is_stamped_before_verification_ends() -> anyhow::Result<()> {
    let camera = Arc::new(CountingCamera::default());
    let station = support::station_with_timeout(
        camera.clone(),
        Arc::new(SilentVerifier),
        Duration::from_millis(300),
    );

    station.start(support::request(ScanMode::Inventory, ScanTechnology::QrCode))?;
    let before = Utc::now();
    let outcome = station.capture(support::payload("P4", "B4")).await?;
    let after = Utc::now();

    let CaptureOutcome::Recorded(report) = outcome else {
        panic!("expected the timeout to be recorded");
    };
    let captured_at = report.result.captured_at();
    assert!(captured_at >= before);
    assert!(
        captured_at - before < chrono::Duration::milliseconds(100),
        "stamped {} ms after capture",
        (captured_at - before).num_milliseconds()
    );
    assert!(after - captured_at >= chrono::Duration::milliseconds(250));
    Ok(())
}

#[tokio::test]
async fn device_error_on_switch_fails_the_session_and_releases_once() -> anyhow::Result<()> {
    let camera = Arc::new(CountingCamera::failing_after(
        1,
        ScanError::DeviceUnavailable {
            facing: Facing::Front,
        },
    ));
    let station = support::station(camera.clone(), Arc::new(ScriptedVerifier::default()));

    station.start(support::request(ScanMode::Transfer, ScanTechnology::Barcode))?;
    assert_eq!(station.state(), SessionState::Active);

    assert_eq!(
        station.switch_facing(Facing::Front),
        Err(ScanError::DeviceUnavailable {
            facing: Facing::Front
        })
    );
    assert_eq!(station.state(), SessionState::Failed);
    assert_eq!(
        station.last_device_error(),
        Some(ScanError::DeviceUnavailable {
            facing: Facing::Front
        })
    );
    assert_eq!(camera.acquisitions(), 1);
    assert_eq!(camera.releases().get(&1), Some(&1));
    camera.assert_each_released_once();

    assert!(station.capture(support::payload("P5", "B5")).await.is_err());
    assert!(station.cancel().is_err());
    assert!(station.ledger().is_empty());
    camera.assert_each_released_once();
    Ok(())
}

#[tokio::test]
async fn denied_permission_fails_the_start_without_a_feed() -> anyhow::Result<()> {
    let denied = ScanError::PermissionDenied {
        facing: Facing::Rear,
    };
    let camera = Arc::new(CountingCamera::failing(denied.clone()));
    let station = support::station(camera.clone(), Arc::new(ScriptedVerifier::default()));

    assert_eq!(
        station.start(support::request(ScanMode::Receipt, ScanTechnology::QrCode)),
        Err(denied.clone())
    );
    assert_eq!(station.state(), SessionState::Failed);
    assert_eq!(station.last_device_error(), Some(denied));
    assert_eq!(camera.acquisitions(), 0);
    assert_eq!(camera.live_feeds(), 0);
    assert!(station.ledger().is_empty());
    Ok(())
}

#[tokio::test]
async fn every_exit_path_releases_each_handle_exactly_once() {
    let camera = Arc::new(CountingCamera::default());
    let verifier = Arc::new(ScriptedVerifier::new([
        VerificationOutcome::verified("0x1"),
        VerificationOutcome::rejected(),
    ]));
    let station = support::station(camera.clone(), verifier);

    // Verified, with a facing switch on the way.
    station
        .start(support::request(ScanMode::Transfer, ScanTechnology::QrCode))
        .unwrap();
    station.switch_facing(Facing::Front).unwrap();
    station.capture(support::payload("P1", "B1")).await.unwrap();

    // Failed verification.
    station
        .start(support::request(ScanMode::Transfer, ScanTechnology::QrCode))
        .unwrap();
    station.capture(support::payload("P2", "B2")).await.unwrap();

    // Cancelled before capture.
    station
        .start(support::request(ScanMode::Transfer, ScanTechnology::QrCode))
        .unwrap();
    station.cancel().unwrap();
    assert!(station.cancel().is_err());

    assert_eq!(camera.acquisitions(), 4);
    camera.assert_each_released_once();
    assert_eq!(station.ledger().len(), 2);
}

#[test]
fn simulated_camera_release_is_idempotent() {
    let camera = SimulatedCamera::new();
    let handle = camera.acquire(Facing::Rear).unwrap();

    camera.release(&handle);
    assert!(!camera.is_streaming());
    camera.release(&handle);
    assert!(!camera.is_streaming());
}

#[test]
fn ledger_invariants_hold_over_the_fixture_history() {
    let ledger = ScanLedger::new();
    for result in fixtures::sample_history() {
        ledger.append(result);

        let metrics = ledger.metrics();
        assert_eq!(metrics.verified + metrics.failed, metrics.total);
        assert_eq!(metrics.by_technology.values().sum::<usize>(), metrics.total);
        assert_eq!(metrics.by_mode.values().sum::<usize>(), metrics.total);
        assert_eq!(metrics.total, ledger.len());
    }

    let query = ledger.query(ScanFilter::new());
    for result in query.iter() {
        assert_eq!(
            result.verification().reference().is_some(),
            result.is_verified(),
            "{}",
            result.id()
        );
    }
}
