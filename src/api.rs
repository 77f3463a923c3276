//! Public API surface for the analysis engine.
//!
//! This file consolidates the identifier newtypes and re-exports the DTO
//! types produced and consumed by the pipeline. All types derive
//! Serialize/Deserialize for JSON serialization.

pub use crate::models::telemetry::LevelReading;
pub use crate::models::telemetry::TelemetryRecord;
pub use crate::models::ticket::RawTransportTicket;
pub use crate::models::ticket::TicketsPayload;
pub use crate::models::ticket::TransportTicket;
pub use crate::services::drains::DrainEvent;
pub use crate::services::reconcile::DiscrepancyClass;
pub use crate::services::reconcile::DiscrepancyRecord;
pub use crate::services::reconcile::Tolerances;
pub use crate::services::snapshot::LevelSnapshot;

use serde::{Deserialize, Serialize};

/// Vessel identifier as reported by the upstream directory.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VesselId(pub String);

impl VesselId {
    pub fn new(value: impl Into<String>) -> Self {
        VesselId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VesselId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VesselId {
    fn from(value: &str) -> Self {
        VesselId::new(value)
    }
}

/// Directory entry for a monitored vessel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselInfo {
    pub id: String,
    pub name: String,
}

/// Time window for a telemetry query, in Unix seconds.
///
/// The upstream data service takes the window as integer query
/// parameters, so the window is kept in that representation end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    pub start: i64,
    pub end: i64,
}

impl AnalysisWindow {
    pub fn new(start: i64, end: i64) -> Self {
        AnalysisWindow { start, end }
    }
}

impl Default for AnalysisWindow {
    /// The upstream service's "everything" window.
    fn default() -> Self {
        AnalysisWindow {
            start: 0,
            end: 2_000_000_000,
        }
    }
}
