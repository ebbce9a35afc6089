use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    /// The external status command failed to launch, timed out, or exited
    /// non-zero. `detail` carries captured stderr when available.
    #[error("rbd mirror pool status failed for pool {pool}: {detail}")]
    Execution { pool: String, detail: String },

    /// The external command produced output that is not valid JSON in the
    /// expected shape.
    #[error("failed to decode rbd status for pool {pool}: {source}")]
    Decode {
        pool: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExporterError>;
