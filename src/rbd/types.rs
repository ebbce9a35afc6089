//! RBD Mirror Status Type Definitions
//!
//! Rust struct definitions for the JSON emitted by
//! `rbd mirror pool status --format json <pool>`.
//!
//! # Design Notes
//!
//! - **Open state vocabulary**: `states` is a plain map rather than a struct
//!   with one field per state, so state names Ceph introduces later are
//!   preserved and reported without a code change.
//! - **Optional Fields**: `daemon_health` and `image_health` are omitted by
//!   some Ceph releases, so they deserialize as `Option`.
//! - **Serde Defaults**: a missing `states` object decodes as an empty map
//!   instead of failing the whole document.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Summary section of the mirror pool status document.
///
/// Kept as a separate struct so fixtures and tests can build one directly.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PoolStatusSummary {
    pub health: String,
    #[serde(default)]
    pub daemon_health: Option<String>,
    #[serde(default)]
    pub image_health: Option<String>,
    /// Image count per replication state. Keys are not constrained to the
    /// known-state list.
    #[serde(default)]
    pub states: BTreeMap<String, u64>,
}

/// Full decoded response for one pool at one point in time.
///
/// Created fresh per scrape-per-pool and discarded once metrics are derived;
/// nothing is cached across scrapes.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PoolStatus {
    pub summary: PoolStatusSummary,
}
