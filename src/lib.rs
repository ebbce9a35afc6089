//! Ceph RBD Mirror Prometheus Exporter
//!
//! A Prometheus metrics exporter for Ceph RBD mirror pool status.
//!
//! # Overview
//!
//! This exporter shells out to the `rbd` CLI to query mirror status for a
//! configured set of pools and republishes the per-state image counters as
//! gauges. Every scrape is a fresh snapshot: the external command runs once
//! per pool per scrape and the resulting metric set replaces the previous one.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   rbd mirror pool    ┌──────────────┐
//! │    Ceph     │ ◄──────────────────  │   Exporter   │
//! │   cluster   │   status (JSON)      │              │
//! └─────────────┘                      │  ┌────────┐  │      HTTP      ┌────────────┐
//!                                      │  │Provider│  │ ◄────────────► │ Prometheus │
//!                                      │  └────────┘  │   /metrics     └────────────┘
//!                                      │  ┌─────────┐ │
//!                                      │  │Collector│ │
//!                                      │  └─────────┘ │
//!                                      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`rbd`] - Status provider trait and `rbd` CLI implementation
//! - [`collector`] - Per-scrape state normalization and metric derivation
//! - [`metrics`] - Prometheus metric definitions and rendering
//! - [`server`] - HTTP server
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use rbd_mirror_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod collector;
pub mod config;
pub mod error;
pub mod metrics;
pub mod rbd;
pub mod server;
