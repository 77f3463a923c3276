//! Drain-event detection over per-vessel level series.
//!
//! A drain is a contiguous non-increasing run in a vessel's level series.
//! The vessel keeps receiving inflow while it drains, so the observed
//! level drop understates the true extraction; the corrected volume adds
//! back the inflow that would have accumulated over the run:
//!
//! ```text
//! corrected_volume = (level_before - level_after) + fill_rate * duration_minutes
//! ```
//!
//! This assumes the inflow is constant and independent of the drain — a
//! deliberate modeling simplification.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::VesselId;
use crate::models::telemetry::{minutes_between, LevelReading, VesselSeries};
use crate::services::fill_rate::FillRates;
use crate::services::round2;

/// Corrected volumes at or below this are treated as sensor noise and
/// not materialized (strict inequality: exactly 1.0 is excluded).
pub const NOISE_FLOOR_LITERS: f64 = 1.0;

/// One detected drain with its inflow-corrected volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrainEvent {
    pub vessel_id: VesselId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Calendar date of `start_time`, used for daily aggregation.
    pub date: NaiveDate,
    pub level_before: f64,
    pub level_after: f64,
    pub duration_minutes: f64,
    /// Fill rate applied in the correction, L/min.
    pub fill_rate: f64,
    /// Corrected extraction volume in liters, rounded to 2 decimals.
    pub corrected_volume: f64,
}

/// Detect every drain event across all vessels.
///
/// The output order follows the vessel iteration order and is not part
/// of the contract.
pub fn detect_drain_events(series: &VesselSeries, fill_rates: &FillRates) -> Vec<DrainEvent> {
    let mut events = Vec::new();

    for (vessel, readings) in series {
        let fill_rate = fill_rates.get(vessel).copied().unwrap_or(0.0);
        scan_vessel(vessel, readings, fill_rate, &mut events);
    }

    events
}

/// Scan one vessel's sorted readings for drain runs.
fn scan_vessel(
    vessel: &VesselId,
    readings: &[LevelReading],
    fill_rate: f64,
    events: &mut Vec<DrainEvent>,
) {
    let mut i = 0;
    while i + 1 < readings.len() {
        if readings[i + 1].level < readings[i].level {
            let start = i;
            let mut end = i + 1;

            // A run extends through flat plateaus; only a strict rise
            // (or the end of the series) terminates it.
            while end + 1 < readings.len() && readings[end + 1].level <= readings[end].level {
                end += 1;
            }

            let level_before = readings[start].level;
            let level_after = readings[end].level;
            let duration_minutes =
                minutes_between(readings[start].timestamp, readings[end].timestamp);

            let observed_drop = level_before - level_after;
            let filled_during_drain = fill_rate * duration_minutes;
            let corrected_volume = observed_drop + filled_during_drain;

            if corrected_volume > NOISE_FLOOR_LITERS {
                let event = DrainEvent {
                    vessel_id: vessel.clone(),
                    start_time: readings[start].timestamp,
                    end_time: readings[end].timestamp,
                    date: readings[start].timestamp.date_naive(),
                    level_before,
                    level_after,
                    duration_minutes,
                    fill_rate,
                    corrected_volume: round2(corrected_volume),
                };
                log::debug!(
                    "vessel {vessel}: drain on {} of {:.2} L ({:.1} min)",
                    event.date,
                    event.corrected_volume,
                    event.duration_minutes
                );
                events.push(event);
            }

            // The run's last reading may itself start the next run.
            i = end;
        } else {
            i += 1;
        }
    }
}
