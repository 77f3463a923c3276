//! End-to-end discrepancy analysis.
//!
//! The orchestrator fetches telemetry, tickets, and the vessel directory
//! through a [`VesselDataProvider`], then runs the synchronous pipeline:
//! estimate fill rates, detect drains, reconcile against tickets.
//!
//! Each call is stateless and recomputes from scratch; provider errors
//! propagate unmodified and abort the call.

use crate::api::{AnalysisWindow, VesselId};
use crate::models::telemetry::{self, TelemetryError};
use crate::providers::{ProviderError, VesselDataProvider};
use crate::services::drains::{self, DrainEvent};
use crate::services::fill_rate;
use crate::services::reconcile::{self, DiscrepancyRecord, NameLookup, Tolerances};
use crate::services::snapshot::{self, LevelSnapshot};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to create async runtime: {0}")]
    Runtime(String),
}

/// Run the full pipeline for one time window.
pub async fn run_discrepancy_analysis(
    provider: &dyn VesselDataProvider,
    window: AnalysisWindow,
    tolerances: &Tolerances,
) -> Result<Vec<DiscrepancyRecord>, AnalysisError> {
    let records = provider.fetch_telemetry(window).await?;
    let payload = provider.fetch_tickets().await?;
    let directory = provider.fetch_vessels().await?;

    let series = telemetry::group_by_vessel(&records)?;
    let fill_rates = fill_rate::estimate_fill_rates(&series);
    let events = drains::detect_drain_events(&series, &fill_rates);
    log::info!(
        "detected {} drain events across {} vessels",
        events.len(),
        series.len()
    );

    let tickets = reconcile::normalize_tickets(&payload.transport_tickets);
    let names: NameLookup = directory
        .into_iter()
        .map(|vessel| (VesselId::new(vessel.id), vessel.name))
        .collect();

    Ok(reconcile::reconcile_tickets(
        &events, &tickets, &names, tolerances,
    ))
}

/// Blocking wrapper around [`run_discrepancy_analysis`] for callers
/// without an async runtime of their own.
pub fn run_discrepancy_analysis_blocking(
    provider: &dyn VesselDataProvider,
    window: AnalysisWindow,
    tolerances: &Tolerances,
) -> Result<Vec<DiscrepancyRecord>, AnalysisError> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|err| AnalysisError::Runtime(err.to_string()))?;
    runtime.block_on(run_discrepancy_analysis(provider, window, tolerances))
}

/// Detect drain events for one time window, without reconciliation.
pub async fn detect_drains_for_window(
    provider: &dyn VesselDataProvider,
    window: AnalysisWindow,
) -> Result<Vec<DrainEvent>, AnalysisError> {
    let records = provider.fetch_telemetry(window).await?;
    let series = telemetry::group_by_vessel(&records)?;
    let fill_rates = fill_rate::estimate_fill_rates(&series);
    Ok(drains::detect_drain_events(&series, &fill_rates))
}

/// Latest level per vessel over one time window.
pub async fn latest_levels_for_window(
    provider: &dyn VesselDataProvider,
    window: AnalysisWindow,
) -> Result<std::collections::BTreeMap<VesselId, LevelSnapshot>, AnalysisError> {
    let records = provider.fetch_telemetry(window).await?;
    let series = telemetry::group_by_vessel(&records)?;
    Ok(snapshot::latest_levels(&series))
}
