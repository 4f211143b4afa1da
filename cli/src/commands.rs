pub mod demo;
pub mod history;
pub mod scan;
pub mod stats;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::{Instrument, info_span, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use shelfscan_common::ScanError;
use shelfscan_common::config::Config;
use shelfscan_common::scan::device::Facing;
use shelfscan_common::scan::mode::ScanMode;
use shelfscan_common::scan::payload::{RawCapturePayload, SourceType};
use shelfscan_common::scan::result::Attribution;
use shelfscan_common::scan::technology::ScanTechnology;
use shelfscan_core::device::CaptureDevice;
use shelfscan_core::ledger::ScanLedger;
use shelfscan_core::station::{CaptureOutcome, ScanStation, StationConfig};
use shelfscan_core::verifier::SimulatedVerifier;

use crate::terminal::spinner;

#[derive(Parser)]
#[command(name = "shelfscan")]
#[command(about = "Scan, verify and route warehouse stock.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print less (-q hides headers, -qq only keeps summaries)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Who is scanning
    #[arg(long, global = true, default_value = "Warehouse Operator")]
    pub operator: String,

    /// Where the scan happens
    #[arg(long, global = true, default_value = "Main Warehouse")]
    pub location: String,

    /// Simulated verification delay in milliseconds
    #[arg(long, global = true, default_value_t = 1_500)]
    pub delay_ms: u64,

    /// Verification timeout in milliseconds
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Share of simulated verifications that fail, 0.0 to 1.0
    #[arg(long, global = true, default_value_t = 0.0)]
    pub reject_rate: f64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one scan against the simulated camera and backend
    #[command(alias = "s")]
    Scan(ScanArgs),
    /// Search the recorded scan history
    #[command(alias = "h")]
    History(HistoryArgs),
    /// Show scan metrics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a scripted shift of scans and print the results
    Demo,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Product id decoded from the code
    #[arg(long)]
    pub product: String,

    /// Batch number decoded from the code
    #[arg(long)]
    pub batch: String,

    /// What the code was printed on: product, transfer or order
    #[arg(long, default_value = "product")]
    pub source: SourceType,

    /// inventory, transfer, receipt, shipping or verification
    #[arg(long, default_value = "inventory")]
    pub mode: ScanMode,

    /// qr-code, barcode, rfid or manual
    #[arg(long = "tech", default_value = "qr-code")]
    pub technology: ScanTechnology,

    /// Camera to open: rear or front
    #[arg(long, default_value = "rear")]
    pub facing: Facing,

    /// Switch to this camera before capturing
    #[arg(long)]
    pub switch_to: Option<Facing>,

    /// Free-text notes stored with the scan
    #[arg(long)]
    pub notes: Option<String>,

    /// Simulate a camera the user refused access to
    #[arg(long)]
    pub deny_camera: bool,
}

#[derive(Args)]
pub struct HistoryArgs {
    #[arg(long = "tech")]
    pub technology: Option<ScanTechnology>,

    #[arg(long)]
    pub mode: Option<ScanMode>,

    /// Only verified scans
    #[arg(long, conflicts_with = "failed")]
    pub verified: bool,

    /// Only scans that failed verification
    #[arg(long)]
    pub failed: bool,

    /// Match id, product, location or operator
    #[arg(long)]
    pub search: Option<String>,

    /// Earliest capture time (RFC 3339)
    #[arg(long)]
    pub since: Option<DateTime<Utc>>,

    /// Latest capture time (RFC 3339)
    #[arg(long)]
    pub until: Option<DateTime<Utc>>,

    /// Show at most this many entries
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            quiet: self.quiet,
            operator: self.operator.clone(),
            location: self.location.clone(),
            verification_delay: Duration::from_millis(self.delay_ms),
            verification_timeout: Duration::from_millis(self.timeout_ms),
            rejection_rate: self.reject_rate,
        }
    }
}

pub fn build_station(
    camera: Arc<dyn CaptureDevice>,
    ledger: Arc<ScanLedger>,
    cfg: &Config,
) -> ScanStation {
    let verifier = SimulatedVerifier::new(cfg.verification_delay)
        .with_rejection_rate(cfg.rejection_rate);
    let station_cfg = StationConfig {
        verification_timeout: cfg.verification_timeout,
    };
    ScanStation::new(camera, Arc::new(verifier), ledger, station_cfg)
}

pub fn attribution(cfg: &Config) -> Attribution {
    Attribution::new(cfg.operator.clone(), cfg.location.clone())
}

/// Captures `payload` behind a spinner. Ctrl-C cancels the session.
pub async fn verify(
    station: &ScanStation,
    payload: RawCapturePayload,
) -> Result<CaptureOutcome, ScanError> {
    let span = info_span!("verification", indicatif.pb_show = true);
    spinner::style(&span);
    span.pb_set_message(&format!(
        "Verifying {} / {}...",
        payload.product_id, payload.batch_number
    ));

    let capture = station.capture(payload).instrument(span);
    tokio::pin!(capture);

    tokio::select! {
        outcome = &mut capture => outcome,
        _ = tokio::signal::ctrl_c() => {
            station.cancel()?;
            warn!("Scan cancelled, camera released");
            Ok(CaptureOutcome::Discarded)
        }
    }
}
