//! Analysis services.
//!
//! Pure, synchronous computation: each function takes its inputs by value
//! or reference and holds no state across calls. Identical inputs always
//! produce identical outputs; there is no caching and no shared mutable
//! state. Anything that blocks (fetching telemetry, tickets, or the
//! vessel directory) lives behind the provider trait in
//! [`crate::providers`].

pub mod discrepancy;

pub mod drains;

pub mod fill_rate;

pub mod reconcile;

pub mod snapshot;

pub use discrepancy::{run_discrepancy_analysis, AnalysisError};
pub use drains::detect_drain_events;
pub use fill_rate::estimate_fill_rates;
pub use reconcile::reconcile_tickets;
pub use snapshot::latest_levels;

/// Round to 2 decimal places, the precision of all reported volumes.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.004), 1.0);
        assert_eq!(round2(1.006), 1.01);
        assert_eq!(round2(-5.126), -5.13);
        assert_eq!(round2(35.0), 35.0);
    }
}
