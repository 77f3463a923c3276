//! Per-vessel inflow rate estimation.
//!
//! A vessel's fill rate is inferred from the intervals where its level is
//! purely increasing: every consecutive pair of readings with a positive
//! level delta and positive elapsed time contributes a candidate rate,
//! and the vessel's estimate is the median of the candidates. The median
//! keeps one transient sensor spike from dragging the estimate. The rate
//! is treated as constant over the analysis window.

use std::collections::BTreeMap;

use crate::api::VesselId;
use crate::models::telemetry::{minutes_between, LevelReading, VesselSeries};

/// Estimated inflow rate in L/min per vessel. Always ≥ 0.
pub type FillRates = BTreeMap<VesselId, f64>;

/// Estimate the fill rate of every vessel in the series.
///
/// Vessels with a single reading, or with no increasing interval at all,
/// estimate to 0. Pairs with duplicate timestamps contribute nothing
/// (the elapsed > 0 guard).
pub fn estimate_fill_rates(series: &VesselSeries) -> FillRates {
    series
        .iter()
        .map(|(vessel, readings)| {
            let rate = estimate_vessel_rate(readings);
            log::debug!("vessel {vessel}: estimated fill rate {rate:.3} L/min");
            (vessel.clone(), rate)
        })
        .collect()
}

/// Median of the candidate rates over one vessel's sorted readings.
fn estimate_vessel_rate(readings: &[LevelReading]) -> f64 {
    let mut candidates = Vec::new();

    for pair in readings.windows(2) {
        let elapsed_minutes = minutes_between(pair[0].timestamp, pair[1].timestamp);
        let delta = pair[1].level - pair[0].level;
        // Only pure-fill intervals: drains and duplicate timestamps are excluded.
        if delta > 0.0 && elapsed_minutes > 0.0 {
            candidates.push(delta / elapsed_minutes);
        }
    }

    median(&mut candidates)
}

/// Standard median: mean of the two middle elements for an even count,
/// 0.0 for an empty slice.
pub(crate) fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
