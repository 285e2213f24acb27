// Source trait for telemetry snapshots
use crate::domain::telemetry::TelemetrySnapshot;
use async_trait::async_trait;

/// Why a status fetch produced no snapshot
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("no response received")]
    Unreachable,
    #[error("upstream responded with status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("{message}")]
    Other { message: String },
}

#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Fetch one snapshot. Implementations do not retry.
    async fn fetch(&self) -> Result<TelemetrySnapshot, FetchError>;

    /// Where the snapshots come from, for log lines
    fn describe(&self) -> String;
}
