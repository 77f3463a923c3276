//! # Vessel Watch
//!
//! Telemetry reconciliation engine for monitored storage vessels.
//!
//! This crate turns noisy level telemetry into discrete drain events with
//! inflow-corrected extraction volumes, then reconciles the corrected
//! volumes against independently reported transport tickets to surface
//! per-day, per-vessel volume discrepancies (suspected unaccounted loss).
//!
//! ## Features
//!
//! - **Fill-rate inference**: robust per-vessel inflow rate from the
//!   median of observed pure-fill intervals
//! - **Drain detection**: scan-based segmentation of non-increasing level
//!   runs, corrected for the inflow received while draining
//! - **Ticket reconciliation**: group-then-aggregate comparison of drain
//!   volumes against transport tickets, keyed by (date, vessel)
//! - **Providers**: pluggable data access for the upstream telemetry,
//!   ticket, and directory services
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: identifier newtypes and the consolidated DTO surface
//! - [`models`]: wire payloads and their normalization into domain types
//! - [`services`]: the analysis pipeline (pure, synchronous computation)
//! - [`providers`]: data-provider trait and its local/upstream backends
//! - [`config`]: environment and TOML configuration

pub mod api;

pub mod config;
pub mod models;

pub mod providers;

pub mod services;
