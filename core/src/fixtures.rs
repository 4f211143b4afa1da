//! Static scan history used to seed demo ledgers.

use chrono::{DateTime, TimeZone, Utc};

use shelfscan_common::scan::mode::ScanMode;
use shelfscan_common::scan::payload::{RawCapturePayload, SourceType};
use shelfscan_common::scan::result::{Attribution, ScanId, ScanResult};
use shelfscan_common::scan::technology::ScanTechnology;
use shelfscan_common::scan::verification::VerificationOutcome;

struct Fixture {
    id: &'static str,
    at: (u32, u32, u32),
    product: &'static str,
    batch: &'static str,
    source: SourceType,
    technology: ScanTechnology,
    mode: ScanMode,
    operator: &'static str,
    location: &'static str,
    reference: Option<&'static str>,
    notes: Option<&'static str>,
}

const HISTORY: &[Fixture] = &[
    Fixture {
        id: "SCN-1705309800000",
        at: (15, 9, 10),
        product: "PRD-2024-001",
        batch: "BATCH-A12",
        source: SourceType::Product,
        technology: ScanTechnology::QrCode,
        mode: ScanMode::Inventory,
        operator: "John Smith",
        location: "Warehouse A - Bay 3",
        reference: Some("0x7a3f9c2e1b4d8a6f0e5c3b9d2a7f4e1c8b6d3a9f2e5c7b1d4a8f6e3c9b2d5a7f"),
        notes: Some("Quarterly stock count"),
    },
    Fixture {
        id: "SCN-1705311600000",
        at: (15, 9, 40),
        product: "PRD-2024-002",
        batch: "BATCH-B07",
        source: SourceType::Transfer,
        technology: ScanTechnology::Barcode,
        mode: ScanMode::Transfer,
        operator: "Sarah Johnson",
        location: "Distribution Center",
        reference: Some("0x1c8b6d3a9f2e5c7b1d4a8f6e3c9b2d5a7f7a3f9c2e1b4d8a6f0e5c3b9d2a7f4e"),
        notes: None,
    },
    Fixture {
        id: "SCN-1705313400000",
        at: (15, 10, 10),
        product: "PRD-2024-003",
        batch: "BATCH-C21",
        source: SourceType::Order,
        technology: ScanTechnology::Rfid,
        mode: ScanMode::Shipping,
        operator: "Mike Wilson",
        location: "Loading Dock 2",
        reference: Some("0x9d2a7f4e1c8b6d3a9f2e5c7b1d4a8f6e3c9b2d5a7f7a3f9c2e1b4d8a6f0e5c3b"),
        notes: Some("Express shipment"),
    },
    Fixture {
        id: "SCN-1705315200000",
        at: (15, 10, 40),
        product: "PRD-2024-004",
        batch: "BATCH-D03",
        source: SourceType::Product,
        technology: ScanTechnology::Rfid,
        mode: ScanMode::Receipt,
        operator: "Emily Davis",
        location: "Receiving Area",
        reference: None,
        notes: Some("Tag unreadable, sent for manual check"),
    },
    Fixture {
        id: "SCN-1705395600000",
        at: (16, 9, 0),
        product: "PRD-2024-005",
        batch: "BATCH-E15",
        source: SourceType::Product,
        technology: ScanTechnology::Manual,
        mode: ScanMode::Verification,
        operator: "John Smith",
        location: "Quality Control",
        reference: Some("0x4a8f6e3c9b2d5a7f7a3f9c2e1b4d8a6f0e5c3b9d2a7f4e1c8b6d3a9f2e5c7b1d"),
        notes: None,
    },
    Fixture {
        id: "SCN-1705399200000",
        at: (16, 10, 0),
        product: "PRD-2024-001",
        batch: "BATCH-A13",
        source: SourceType::Product,
        technology: ScanTechnology::QrCode,
        mode: ScanMode::Receipt,
        operator: "Sarah Johnson",
        location: "Warehouse A - Bay 1",
        reference: Some("0x2e5c7b1d4a8f6e3c9b2d5a7f7a3f9c2e1b4d8a6f0e5c3b9d2a7f4e1c8b6d3a9f"),
        notes: None,
    },
    Fixture {
        id: "SCN-1705402800000",
        at: (16, 11, 0),
        product: "PRD-2024-006",
        batch: "BATCH-F02",
        source: SourceType::Transfer,
        technology: ScanTechnology::Barcode,
        mode: ScanMode::Transfer,
        operator: "Mike Wilson",
        location: "Warehouse B",
        reference: None,
        notes: None,
    },
    Fixture {
        id: "SCN-1705406400000",
        at: (16, 12, 0),
        product: "PRD-2024-007",
        batch: "BATCH-G11",
        source: SourceType::Order,
        technology: ScanTechnology::QrCode,
        mode: ScanMode::Shipping,
        operator: "Emily Davis",
        location: "Loading Dock 1",
        reference: Some("0xf6e3c9b2d5a7f7a3f9c2e1b4d8a6f0e5c3b9d2a7f4e1c8b6d3a9f2e5c7b1d4a8"),
        notes: Some("Customer order #4471"),
    },
];

/// Past scans from January 2024, oldest first.
pub fn sample_history() -> Vec<ScanResult> {
    HISTORY
        .iter()
        .filter_map(|fixture| {
            let (day, hour, minute) = fixture.at;
            let captured_at: DateTime<Utc> = Utc
                .with_ymd_and_hms(2024, 1, day, hour, minute, 0)
                .single()?;
            let verification = match fixture.reference {
                Some(reference) => VerificationOutcome::verified(reference),
                None => VerificationOutcome::rejected(),
            };
            Some(ScanResult::new(
                ScanId::new(fixture.id),
                captured_at,
                RawCapturePayload::new(fixture.product, fixture.batch, fixture.source),
                fixture.technology,
                fixture.mode,
                Attribution::new(fixture.operator, fixture.location),
                verification,
                fixture.notes.map(str::to_owned),
            ))
        })
        .collect()
}
