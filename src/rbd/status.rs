//! Pool Status Provider
//!
//! Defines the one-method capability the collector depends on, plus the
//! production implementation that shells out to the `rbd` CLI.
//!
//! The trait exists so the collector can be driven by a fixture in tests (or
//! by some future librbd wrapper) without touching the collection logic.

use crate::config::RbdConfig;
use crate::error::{ExporterError, Result};
use crate::rbd::types::PoolStatus;
use std::future::Future;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Source of mirror status for a single named pool.
///
/// Implementations must not retry and must not log; errors surface to the
/// caller, which owns failure reporting.
pub trait PoolStatusProvider {
    fn pool_status(&self, pool: &str) -> impl Future<Output = Result<PoolStatus>> + Send;
}

/// Queries mirror status by executing `rbd mirror pool status --format json`.
///
/// This could be implemented on top of librbd, but execing the CLI keeps the
/// exporter free of native Ceph bindings and works anywhere the `rbd` binary
/// is installed and privileged.
pub struct RbdMirrorStatus {
    program: String,
    command_timeout: Duration,
}

impl RbdMirrorStatus {
    pub fn new(config: &RbdConfig) -> Self {
        Self {
            program: config.program.clone(),
            command_timeout: Duration::from_secs(config.command_timeout_seconds),
        }
    }
}

impl PoolStatusProvider for RbdMirrorStatus {
    async fn pool_status(&self, pool: &str) -> Result<PoolStatus> {
        // The pool name is passed through untouched; the rbd CLI is the
        // authority on what constitutes a valid pool spec.
        // A timeout drops the output future; take the hung child down with
        // it, or every scrape of a stuck pool leaks one orphaned process.
        let result = timeout(
            self.command_timeout,
            Command::new(&self.program)
                .args(["mirror", "pool", "status", "--format", "json"])
                .arg(pool)
                .kill_on_drop(true)
                .output(),
        )
        .await;

        let output = match result {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ExporterError::Execution {
                    pool: pool.to_string(),
                    detail: e.to_string(),
                })
            }
            Err(_) => {
                return Err(ExporterError::Execution {
                    pool: pool.to_string(),
                    detail: format!("timed out after {}s", self.command_timeout.as_secs()),
                })
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(ExporterError::Execution {
                pool: pool.to_string(),
                detail,
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|e| ExporterError::Decode {
            pool: pool.to_string(),
            source: e,
        })
    }
}
