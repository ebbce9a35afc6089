//! Pool Mirror Collector
//!
//! Turns the configured pool list into a flat list of metric samples, once
//! per scrape. Each pool's raw state counters are normalized against
//! [`KNOWN_STATES`] so dashboards always see the full state vocabulary even
//! when a pool is quiet, and states the vocabulary does not know about pass
//! through untouched.
//!
//! # Error Handling
//!
//! A pool whose status query fails contributes exactly one
//! [`PoolMetric::Error`] sample and never prevents the remaining pools from
//! being collected. Failures are logged here, not in the provider.

use crate::rbd::PoolStatusProvider;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// States that must always appear in output, backfilled to zero when the
/// raw response omits them. A floor, not a ceiling: states outside this
/// list are still emitted. Keeping this as data rather than struct fields
/// means a new Ceph state shows up in metrics without a code change.
pub const KNOWN_STATES: [&str; 5] = [
    "replaying",
    "starting_replay",
    "stopping_replay",
    "stopped",
    "down+unknown",
];

/// One sample produced by a scrape pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolMetric {
    /// Gauge sample for `pool_mirror_status_state{pool, state}`.
    State {
        pool: String,
        state: String,
        count: u64,
    },
    /// Error marker for a pool whose status could not be obtained. Carries
    /// the error text only; no pool/state labels.
    Error { message: String },
}

/// Ensure every known state is present, preserving everything already there.
///
/// Pure set-union step, separated out so the backfill invariant can be tested
/// without a provider.
pub fn normalize_states(mut states: BTreeMap<String, u64>) -> BTreeMap<String, u64> {
    for state in KNOWN_STATES {
        states.entry(state.to_string()).or_insert(0);
    }
    states
}

/// Scrapes mirror status for a fixed, ordered list of pools.
///
/// Holds no state between scrapes beyond the pool list and the provider, so
/// two consecutive collections against unchanged external state yield the
/// same samples.
pub struct PoolCollector<P> {
    pools: Vec<String>,
    provider: P,
}

impl<P: PoolStatusProvider> PoolCollector<P> {
    pub fn new(pools: Vec<String>, provider: P) -> Self {
        Self { pools, provider }
    }

    /// Run one scrape pass over all configured pools, in configured order.
    pub async fn collect(&self) -> Vec<PoolMetric> {
        let mut samples = Vec::new();
        for pool in &self.pools {
            match self.collect_pool(pool).await {
                Ok(states) => {
                    debug!("collected {} states for pool {}", states.len(), pool);
                    for (state, count) in states {
                        samples.push(PoolMetric::State {
                            pool: pool.clone(),
                            state,
                            count,
                        });
                    }
                }
                Err(e) => {
                    warn!("failed to collect pool {}: {}", pool, e);
                    samples.push(PoolMetric::Error {
                        message: e.to_string(),
                    });
                }
            }
        }
        samples
    }

    async fn collect_pool(&self, pool: &str) -> crate::error::Result<BTreeMap<String, u64>> {
        let status = self.provider.pool_status(pool).await?;
        Ok(normalize_states(status.summary.states))
    }
}
