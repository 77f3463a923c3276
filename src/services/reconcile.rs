//! Reconciliation of drain events against transport tickets.
//!
//! Both sides are aggregated into an ordered map keyed by
//! `(date, vessel_id)` and compared over the union of keys. Every pair
//! present in either aggregate is emitted; the tolerances only drive the
//! diagnostic classification, never the output set.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::VesselId;
use crate::models::ticket::{RawTransportTicket, TransportTicket};
use crate::services::drains::DrainEvent;
use crate::services::round2;

/// Display names for vessels, keyed by id. Missing entries fall back to
/// the raw id.
pub type NameLookup = BTreeMap<VesselId, String>;

/// Accumulated volume per (date, vessel) key.
type VolumeByDay = BTreeMap<(NaiveDate, VesselId), f64>;

/// Tolerance parameters for the diagnostic classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    /// Absolute tolerance in liters.
    #[serde(default = "default_eps_abs")]
    pub eps_abs: f64,
    /// Relative tolerance. Accepted for interface parity with the
    /// upstream contract; classification is defined on `eps_abs` alone.
    #[serde(default = "default_eps_pct")]
    pub eps_pct: f64,
}

fn default_eps_abs() -> f64 {
    5.0
}

fn default_eps_pct() -> f64 {
    0.05
}

impl Default for Tolerances {
    fn default() -> Self {
        Tolerances {
            eps_abs: default_eps_abs(),
            eps_pct: default_eps_pct(),
        }
    }
}

/// Diagnostic label for a discrepancy record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyClass {
    /// |missing| ≤ eps_abs.
    Match,
    /// missing > eps_abs: suspected unaccounted loss.
    Shortage,
    /// missing < -eps_abs: tickets over-report.
    Surplus,
}

impl Tolerances {
    /// Classify a signed missing volume. The boundary is inclusive:
    /// exactly `eps_abs` still matches.
    pub fn classify(&self, missing_volume: f64) -> DiscrepancyClass {
        if missing_volume > self.eps_abs {
            DiscrepancyClass::Shortage
        } else if missing_volume < -self.eps_abs {
            DiscrepancyClass::Surplus
        } else {
            DiscrepancyClass::Match
        }
    }
}

/// One (date, vessel) comparison of ticketed versus detected volume.
/// All volumes are rounded to 2 decimals; `missing_volume` is signed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscrepancyRecord {
    pub date: NaiveDate,
    pub vessel_id: VesselId,
    pub vessel_name: String,
    /// Ticket sum for the key.
    pub expected_volume: f64,
    /// Corrected drain sum for the key.
    pub actual_volume: f64,
    /// actual − expected. Positive means unaccounted loss.
    pub missing_volume: f64,
}

/// Normalize raw tickets, skipping malformed records.
///
/// A ticket that cannot be normalized is logged and dropped; the rest of
/// the batch is unaffected. Telemetry gets the opposite, fail-fast
/// treatment (see [`crate::models::telemetry::group_by_vessel`]).
pub fn normalize_tickets(raw_tickets: &[RawTransportTicket]) -> Vec<TransportTicket> {
    raw_tickets
        .iter()
        .filter_map(|raw| match TransportTicket::try_from(raw) {
            Ok(ticket) => Some(ticket),
            Err(err) => {
                log::warn!("skipping malformed transport ticket: {err}");
                None
            }
        })
        .collect()
}

fn aggregate_drains(events: &[DrainEvent]) -> VolumeByDay {
    let mut totals = VolumeByDay::new();
    for event in events {
        *totals
            .entry((event.date, event.vessel_id.clone()))
            .or_insert(0.0) += event.corrected_volume;
    }
    totals
}

fn aggregate_tickets(tickets: &[TransportTicket]) -> VolumeByDay {
    let mut totals = VolumeByDay::new();
    for ticket in tickets {
        *totals
            .entry((ticket.date(), ticket.vessel_id.clone()))
            .or_insert(0.0) += ticket.volume;
    }
    totals
}

/// Compare aggregated drain volumes against aggregated ticket volumes.
///
/// Records come out in ascending date order (the composite key is an
/// ordered map); the vessel order within a date is not part of the
/// contract.
pub fn reconcile_tickets(
    events: &[DrainEvent],
    tickets: &[TransportTicket],
    names: &NameLookup,
    tolerances: &Tolerances,
) -> Vec<DiscrepancyRecord> {
    let actual_by_day = aggregate_drains(events);
    let expected_by_day = aggregate_tickets(tickets);

    let mut keys: BTreeSet<(NaiveDate, VesselId)> = actual_by_day.keys().cloned().collect();
    keys.extend(expected_by_day.keys().cloned());

    keys.into_iter()
        .map(|key| {
            let actual_volume = round2(actual_by_day.get(&key).copied().unwrap_or(0.0));
            let expected_volume = round2(expected_by_day.get(&key).copied().unwrap_or(0.0));
            let missing_volume = round2(actual_volume - expected_volume);

            let (date, vessel_id) = key;
            let vessel_name = names
                .get(&vessel_id)
                .cloned()
                .unwrap_or_else(|| vessel_id.to_string());

            match tolerances.classify(missing_volume) {
                DiscrepancyClass::Shortage => log::warn!(
                    "{date} {vessel_name}: {missing_volume:.2} L unaccounted for"
                ),
                DiscrepancyClass::Surplus => log::info!(
                    "{date} {vessel_name}: tickets over-report by {:.2} L",
                    -missing_volume
                ),
                DiscrepancyClass::Match => log::debug!(
                    "{date} {vessel_name}: volumes match within tolerance"
                ),
            }

            DiscrepancyRecord {
                date,
                vessel_id,
                vessel_name,
                expected_volume,
                actual_volume,
                missing_volume,
            }
        })
        .collect()
}
