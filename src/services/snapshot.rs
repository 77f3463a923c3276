//! Latest-level snapshot per vessel.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::VesselId;
use crate::models::telemetry::VesselSeries;

/// A vessel's most recent reading inside the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub timestamp: DateTime<Utc>,
    pub level: f64,
}

/// Most recent level per vessel. Series are sorted ascending and the
/// sort is stable, so on duplicate timestamps the later reading wins.
pub fn latest_levels(series: &VesselSeries) -> BTreeMap<VesselId, LevelSnapshot> {
    series
        .iter()
        .filter_map(|(vessel, readings)| {
            readings.last().map(|reading| {
                (
                    vessel.clone(),
                    LevelSnapshot {
                        timestamp: reading.timestamp,
                        level: reading.level,
                    },
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::latest_levels;
    use crate::api::VesselId;
    use crate::models::telemetry::{group_by_vessel, TelemetryRecord};

    fn record(timestamp: &str, levels: &[(&str, f64)]) -> TelemetryRecord {
        TelemetryRecord {
            timestamp: timestamp.to_string(),
            levels: levels
                .iter()
                .map(|(id, level)| (id.to_string(), *level))
                .collect(),
        }
    }

    #[test]
    fn test_latest_reading_wins() {
        let series = group_by_vessel(&[
            record("2025-03-01T10:00:00Z", &[("a", 40.0), ("b", 10.0)]),
            record("2025-03-01T12:00:00Z", &[("a", 55.0)]),
            record("2025-03-01T11:00:00Z", &[("a", 50.0), ("b", 12.0)]),
        ])
        .unwrap();

        let snapshots = latest_levels(&series);
        assert_eq!(snapshots[&VesselId::new("a")].level, 55.0);
        assert_eq!(snapshots[&VesselId::new("b")].level, 12.0);
    }

    #[test]
    fn test_empty_series() {
        let series = group_by_vessel(&[]).unwrap();
        assert!(latest_levels(&series).is_empty());
    }
}
