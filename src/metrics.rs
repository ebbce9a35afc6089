//! Prometheus Metrics Definitions
//!
//! This module defines the metrics exposed by the exporter and renders them
//! in Prometheus text format.
//!
//! # Metrics
//!
//! - `pool_mirror_status_state{pool, state}` - Gauge: count of mirrored
//!   images per replication state, one series per (pool, state) pair.
//! - `rbd_exporter_error{error}` - Gauge set to 1 for each pool whose status
//!   query failed during the scrape; the label carries the error text.
//!
//! # Lifetime
//!
//! A [`ScrapeMetrics`] is built fresh for every scrape and discarded after
//! rendering. Gauge values therefore replace rather than accumulate, and
//! series for pools that disappear (or errors that clear) never linger from
//! a previous scrape.

use crate::collector::PoolMetric;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

/// One scrape's worth of registered metrics.
pub struct ScrapeMetrics {
    registry: Registry,
    pub pool_state: GaugeVec,
    pub exporter_error: GaugeVec,
}

impl ScrapeMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let pool_state = GaugeVec::new(
            Opts::new(
                "pool_mirror_status_state",
                "Count of RBD mirror pool states",
            ),
            &["pool", "state"],
        )?;

        let exporter_error = GaugeVec::new(
            Opts::new("rbd_exporter_error", "Error collecting metrics"),
            &["error"],
        )?;

        registry.register(Box::new(pool_state.clone()))?;
        registry.register(Box::new(exporter_error.clone()))?;

        Ok(Self {
            registry,
            pool_state,
            exporter_error,
        })
    }

    /// Apply one scrape's collector output onto the gauges.
    pub fn apply(&self, samples: &[PoolMetric]) {
        for sample in samples {
            match sample {
                PoolMetric::State { pool, state, count } => {
                    self.pool_state
                        .with_label_values(&[pool, state])
                        .set(*count as f64);
                }
                PoolMetric::Error { message } => {
                    self.exporter_error.with_label_values(&[message]).set(1.0);
                }
            }
        }
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
