use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use shelfscan_common::scan::mode::ScanMode;
use shelfscan_common::scan::payload::RawCapturePayload;
use shelfscan_common::scan::technology::ScanTechnology;
use shelfscan_common::scan::verification::VerificationOutcome;

use super::Verifier;

/// Confirms payloads after a fixed delay, like a chain confirmation would.
pub struct SimulatedVerifier {
    delay: Duration,
    rejection_rate: f64,
}

impl SimulatedVerifier {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            rejection_rate: 0.0,
        }
    }

    /// Rejects roughly `rate` of all payloads. Clamped to `0.0..=1.0`.
    pub fn with_rejection_rate(mut self, rate: f64) -> Self {
        self.rejection_rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        self
    }
}

#[async_trait]
impl Verifier for SimulatedVerifier {
    async fn verify(
        &self,
        payload: &RawCapturePayload,
        technology: ScanTechnology,
        mode: ScanMode,
    ) -> VerificationOutcome {
        debug!(
            "Verifying {} / {} ({technology}, {mode})",
            payload.product_id, payload.batch_number
        );
        tokio::time::sleep(self.delay).await;
        roll(self.rejection_rate)
    }
}

fn roll(rejection_rate: f64) -> VerificationOutcome {
    let mut rng = rand::rng();
    if rng.random_bool(rejection_rate) {
        return VerificationOutcome::rejected();
    }
    VerificationOutcome::verified(transaction_reference(&mut rng))
}

/// `0x` followed by 64 hex digits.
fn transaction_reference(rng: &mut impl Rng) -> String {
    let digits: String = (0..4)
        .map(|_| format!("{:016x}", rng.random::<u64>()))
        .collect();
    format!("0x{digits}")
}
