//! HTTP JSON client for the upstream vessel data API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::api::{AnalysisWindow, VesselInfo};
use crate::config::UpstreamConfig;
use crate::models::telemetry::TelemetryRecord;
use crate::models::ticket::TicketsPayload;
use crate::providers::{ProviderError, ProviderResult, VesselDataProvider};

/// Client for the upstream telemetry/ticket/directory API.
///
/// The base URL is an explicit configuration value; there is no global
/// default. Requests are single-shot with a configured timeout and no
/// retries.
#[derive(Debug, Clone)]
pub struct UpstreamProvider {
    base_url: String,
    client: reqwest::Client,
}

impl UpstreamProvider {
    pub fn new(config: &UpstreamConfig) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ProviderError::configuration(err.to_string()))?;

        Ok(UpstreamProvider {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ProviderResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl VesselDataProvider for UpstreamProvider {
    async fn fetch_telemetry(
        &self,
        window: AnalysisWindow,
    ) -> ProviderResult<Vec<TelemetryRecord>> {
        self.get_json(
            "/api/Data",
            &[
                ("start_date", window.start.to_string()),
                ("end_date", window.end.to_string()),
            ],
        )
        .await
    }

    async fn fetch_tickets(&self) -> ProviderResult<TicketsPayload> {
        self.get_json("/api/Tickets", &[]).await
    }

    async fn fetch_vessels(&self) -> ProviderResult<Vec<VesselInfo>> {
        self.get_json("/api/Information/vessels", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::UpstreamProvider;
    use crate::config::UpstreamConfig;

    #[test]
    fn test_trailing_slash_is_normalized() {
        let config = UpstreamConfig {
            base_url: "https://vessels.example.com/".to_string(),
            timeout_secs: 5,
        };
        let provider = UpstreamProvider::new(&config).unwrap();
        assert_eq!(
            provider.url("/api/Tickets"),
            "https://vessels.example.com/api/Tickets"
        );
    }
}
