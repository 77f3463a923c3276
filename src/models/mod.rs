//! Domain models and wire-payload normalization.
//!
//! Wire types mirror the upstream JSON exactly; the functions in these
//! modules turn them into the canonical, timestamp-parsed forms the
//! analysis services operate on.

pub mod telemetry;

pub mod ticket;
