//! In-memory provider for unit testing and local development.

use async_trait::async_trait;

use crate::api::{AnalysisWindow, VesselInfo};
use crate::models::telemetry::TelemetryRecord;
use crate::models::ticket::TicketsPayload;
use crate::providers::{ProviderResult, VesselDataProvider};

/// Provider backed by pre-seeded data.
///
/// Window filtering is the upstream service's job, so this provider
/// returns the seeded records regardless of the window; seed exactly the
/// window under test.
#[derive(Debug, Clone, Default)]
pub struct LocalProvider {
    telemetry: Vec<TelemetryRecord>,
    tickets: TicketsPayload,
    vessels: Vec<VesselInfo>,
}

impl LocalProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_telemetry(mut self, telemetry: Vec<TelemetryRecord>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn with_tickets(mut self, tickets: TicketsPayload) -> Self {
        self.tickets = tickets;
        self
    }

    pub fn with_vessels(mut self, vessels: Vec<VesselInfo>) -> Self {
        self.vessels = vessels;
        self
    }
}

#[async_trait]
impl VesselDataProvider for LocalProvider {
    async fn fetch_telemetry(
        &self,
        _window: AnalysisWindow,
    ) -> ProviderResult<Vec<TelemetryRecord>> {
        Ok(self.telemetry.clone())
    }

    async fn fetch_tickets(&self) -> ProviderResult<TicketsPayload> {
        Ok(self.tickets.clone())
    }

    async fn fetch_vessels(&self) -> ProviderResult<Vec<VesselInfo>> {
        Ok(self.vessels.clone())
    }
}
