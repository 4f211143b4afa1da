use std::time::Duration;

pub struct Config {
    /// Output verbosity. `0` prints everything, `1` drops headers and trees,
    /// `2` only prints the final summary.
    pub quiet: u8,
    /// Identity written into `performed_by` of every recorded scan.
    pub operator: String,
    /// Location written into every recorded scan.
    pub location: String,
    /// How long the simulated verification backend takes to confirm a payload.
    pub verification_delay: Duration,
    /// Upper bound on a verification call before it counts as a timeout.
    pub verification_timeout: Duration,
    /// Share of simulated verifications that come back rejected, `0.0..=1.0`.
    pub rejection_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiet: 0,
            operator: String::from("Warehouse Operator"),
            location: String::from("Main Warehouse"),
            verification_delay: Duration::from_millis(1_500),
            verification_timeout: Duration::from_secs(10),
            rejection_rate: 0.0,
        }
    }
}
