//! Data providers for the upstream telemetry, ticket, and directory
//! services.
//!
//! The analysis services never perform I/O themselves; everything they
//! consume arrives through the [`VesselDataProvider`] trait. Two
//! implementations exist:
//! - `local`: in-memory, for unit testing and local development
//! - `upstream`: HTTP JSON client for the real upstream API
//!
//! Providers do not retry. A failed fetch propagates to the caller
//! unmodified and aborts that call.

pub mod error;

#[cfg(feature = "local-provider")]
pub mod local;
#[cfg(feature = "upstream-provider")]
pub mod upstream;

pub use error::{ProviderError, ProviderResult};

#[cfg(feature = "local-provider")]
pub use local::LocalProvider;
#[cfg(feature = "upstream-provider")]
pub use upstream::UpstreamProvider;

use async_trait::async_trait;

use crate::api::{AnalysisWindow, VesselInfo};
use crate::models::telemetry::TelemetryRecord;
use crate::models::ticket::TicketsPayload;

/// Access to the three upstream collaborators the pipeline consumes.
#[async_trait]
pub trait VesselDataProvider: Send + Sync {
    /// Telemetry records for a time window.
    async fn fetch_telemetry(
        &self,
        window: AnalysisWindow,
    ) -> ProviderResult<Vec<TelemetryRecord>>;

    /// The full transport-ticket feed.
    async fn fetch_tickets(&self) -> ProviderResult<TicketsPayload>;

    /// The vessel directory (ids and display names).
    async fn fetch_vessels(&self) -> ProviderResult<Vec<VesselInfo>>;
}
