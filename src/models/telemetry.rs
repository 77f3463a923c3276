//! Telemetry wire payloads and per-vessel series construction.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::VesselId;

/// One telemetry sample as reported by the upstream data service: a
/// timestamp plus the level of every vessel observed at that instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// ISO-8601 timestamp, parsed lazily so the failure policy is explicit.
    pub timestamp: String,
    /// Level in liters per vessel id.
    #[serde(default)]
    pub levels: BTreeMap<String, f64>,
}

/// A single parsed level reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelReading {
    pub timestamp: DateTime<Utc>,
    pub level: f64,
}

/// Per-vessel level series, sorted ascending by timestamp.
pub type VesselSeries = BTreeMap<VesselId, Vec<LevelReading>>;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid telemetry timestamp '{raw}': {source}")]
    InvalidTimestamp {
        raw: String,
        source: chrono::ParseError,
    },
}

/// Parse an ISO-8601 timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TelemetryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| TelemetryError::InvalidTimestamp {
            raw: raw.to_string(),
            source,
        })
}

/// Elapsed time between two instants, in fractional minutes.
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 60_000.0
}

/// Group raw telemetry into per-vessel series, sorted by timestamp.
///
/// A record with an unparsable timestamp fails the whole batch. Tickets
/// get the opposite treatment (skip and log, see
/// [`crate::services::reconcile::normalize_tickets`]): telemetry is the
/// ground truth the drain scan runs over, and dropping a reading can
/// split one drain run into two.
pub fn group_by_vessel(records: &[TelemetryRecord]) -> Result<VesselSeries, TelemetryError> {
    let mut series: VesselSeries = BTreeMap::new();

    for record in records {
        let timestamp = parse_timestamp(&record.timestamp)?;
        for (vessel, level) in &record.levels {
            series
                .entry(VesselId::new(vessel.clone()))
                .or_default()
                .push(LevelReading {
                    timestamp,
                    level: *level,
                });
        }
    }

    for readings in series.values_mut() {
        readings.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::{group_by_vessel, minutes_between, parse_timestamp, TelemetryRecord};
    use std::collections::BTreeMap;

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
    fn test_parse_timestamp_zulu() {
        let ts = parse_timestamp("2025-03-01T12:30:00Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-01T12:30:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_offset() {
        let ts = parse_timestamp("2025-03-01T14:30:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-01T12:30:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("not-a-timestamp").is_err());
    }

    #[test]
    fn test_minutes_between() {
        let start = parse_timestamp("2025-03-01T12:00:00Z").unwrap();
        let end = parse_timestamp("2025-03-01T12:10:30Z").unwrap();
        assert!((minutes_between(start, end) - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_group_by_vessel_sorts_each_series() {
        let records = vec![
            record("2025-03-01T12:10:00Z", &[("a", 90.0)]),
            record("2025-03-01T12:00:00Z", &[("a", 100.0), ("b", 50.0)]),
        ];
        let series = group_by_vessel(&records).unwrap();

        let a = &series[&super::VesselId::new("a")];
        assert_eq!(a.len(), 2);
        assert!(a[0].timestamp < a[1].timestamp);
        assert_eq!(a[0].level, 100.0);

        assert_eq!(series[&super::VesselId::new("b")].len(), 1);
    }

    #[test]
    fn test_group_by_vessel_fails_on_bad_timestamp() {
        let records = vec![
            record("2025-03-01T12:00:00Z", &[("a", 100.0)]),
            record("yesterday-ish", &[("a", 90.0)]),
        ];
        assert!(group_by_vessel(&records).is_err());
    }

    #[test]
    fn test_record_with_no_levels_is_harmless() {
        let records = vec![TelemetryRecord {
            timestamp: "2025-03-01T12:00:00Z".to_string(),
            levels: BTreeMap::new(),
        }];
        let series = group_by_vessel(&records).unwrap();
        assert!(series.is_empty());
    }
}
