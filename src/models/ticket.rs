//! Transport-ticket wire payloads and their normalization.
//!
//! The upstream ticket feed is not consistent about field names: the
//! timestamp may arrive as `timestamp` or `date`, and the vessel id as
//! `vessel_id` or `vesselId`. Normalization is an explicit step that maps
//! each raw payload to a canonical [`TransportTicket`] or a typed
//! per-record failure, so malformed records are distinguishable from
//! valid ones at the type level.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::VesselId;

/// Wrapper object the ticket service responds with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketsPayload {
    #[serde(default)]
    pub transport_tickets: Vec<RawTransportTicket>,
}

/// A transport ticket exactly as reported upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransportTicket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, alias = "vesselId", skip_serializing_if = "Option::is_none")]
    pub vessel_id: Option<String>,
    #[serde(default)]
    pub volume: f64,
}

/// Canonical transport ticket after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportTicket {
    pub vessel_id: VesselId,
    pub timestamp: DateTime<Utc>,
    pub volume: f64,
}

impl TransportTicket {
    /// Calendar date the ticket is aggregated under.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error("ticket carries neither a 'timestamp' nor a 'date' field")]
    MissingTimestamp,
    #[error("ticket carries neither a 'vessel_id' nor a 'vesselId' field")]
    MissingVesselId,
    #[error("invalid ticket timestamp '{0}'")]
    InvalidTimestamp(String),
}

impl TryFrom<&RawTransportTicket> for TransportTicket {
    type Error = TicketError;

    fn try_from(raw: &RawTransportTicket) -> Result<Self, Self::Error> {
        let raw_timestamp = raw
            .timestamp
            .as_deref()
            .or(raw.date.as_deref())
            .ok_or(TicketError::MissingTimestamp)?;
        let timestamp = parse_ticket_timestamp(raw_timestamp)?;

        let vessel_id = raw
            .vessel_id
            .as_deref()
            .ok_or(TicketError::MissingVesselId)?;

        Ok(TransportTicket {
            vessel_id: VesselId::new(vessel_id),
            timestamp,
            volume: raw.volume,
        })
    }
}

/// Parse a ticket timestamp: full ISO-8601, or a bare `YYYY-MM-DD` date
/// (taken as midnight UTC).
fn parse_ticket_timestamp(raw: &str) -> Result<DateTime<Utc>, TicketError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(TicketError::InvalidTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{RawTransportTicket, TicketsPayload, TransportTicket};
    use chrono::NaiveDate;

    #[test]
    fn test_normalize_with_timestamp_and_snake_case_id() {
        let raw: RawTransportTicket = serde_json::from_str(
            r#"{ "timestamp": "2025-03-01T08:15:00Z", "vessel_id": "v1", "volume": 42.5 }"#,
        )
        .unwrap();
        let ticket = TransportTicket::try_from(&raw).unwrap();

        assert_eq!(ticket.vessel_id.as_str(), "v1");
        assert_eq!(ticket.volume, 42.5);
        assert_eq!(
            ticket.date(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_field_name_variants_normalize_identically() {
        let snake: RawTransportTicket = serde_json::from_str(
            r#"{ "timestamp": "2025-03-01T08:15:00Z", "vessel_id": "v1", "volume": 10.0 }"#,
        )
        .unwrap();
        let camel: RawTransportTicket = serde_json::from_str(
            r#"{ "date": "2025-03-01T08:15:00Z", "vesselId": "v1", "volume": 10.0 }"#,
        )
        .unwrap();

        assert_eq!(
            TransportTicket::try_from(&snake).unwrap(),
            TransportTicket::try_from(&camel).unwrap()
        );
    }

    #[test]
    fn test_date_only_falls_back_to_midnight_utc() {
        let raw = RawTransportTicket {
            date: Some("2025-03-02".to_string()),
            vessel_id: Some("v2".to_string()),
            volume: 5.0,
            ..Default::default()
        };
        let ticket = TransportTicket::try_from(&raw).unwrap();
        assert_eq!(
            ticket.date(),
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_timestamp_wins_over_date_when_both_present() {
        let raw = RawTransportTicket {
            timestamp: Some("2025-03-01T23:00:00Z".to_string()),
            date: Some("2025-03-05".to_string()),
            vessel_id: Some("v1".to_string()),
            volume: 1.0,
        };
        let ticket = TransportTicket::try_from(&raw).unwrap();
        assert_eq!(
            ticket.date(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_missing_fields_are_typed_failures() {
        let no_time = RawTransportTicket {
            vessel_id: Some("v1".to_string()),
            volume: 1.0,
            ..Default::default()
        };
        assert!(TransportTicket::try_from(&no_time).is_err());

        let no_vessel = RawTransportTicket {
            timestamp: Some("2025-03-01T00:00:00Z".to_string()),
            volume: 1.0,
            ..Default::default()
        };
        assert!(TransportTicket::try_from(&no_vessel).is_err());
    }

    #[test]
    fn test_garbage_timestamp_is_a_typed_failure() {
        let raw = RawTransportTicket {
            timestamp: Some("the 3rd of March".to_string()),
            vessel_id: Some("v1".to_string()),
            volume: 1.0,
            ..Default::default()
        };
        assert!(TransportTicket::try_from(&raw).is_err());
    }

    #[test]
    fn test_payload_without_tickets_deserializes_empty() {
        let payload: TicketsPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.transport_tickets.is_empty());
    }
}
