// Relay service - Live status with a configured failure policy
use crate::application::telemetry_source::{FetchError, TelemetrySource};
use crate::domain::telemetry::{TelemetrySnapshot, fallback_snapshot};
use crate::infrastructure::config::FailurePolicy;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    Live(TelemetrySnapshot),
    Fallback(TelemetrySnapshot),
    Failed(FetchError),
}

#[derive(Clone)]
pub struct RelayService {
    source: Arc<dyn TelemetrySource>,
    policy: FailurePolicy,
}

impl RelayService {
    pub fn new(source: Arc<dyn TelemetrySource>, policy: FailurePolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub async fn relay_status(&self) -> RelayOutcome {
        match self.source.fetch().await {
            Ok(snapshot) => RelayOutcome::Live(snapshot),
            Err(e) => {
                tracing::error!(
                    source = %self.source.describe(),
                    error = %e,
                    "Error fetching status"
                );
                match self.policy {
                    FailurePolicy::Fallback => RelayOutcome::Fallback(fallback_snapshot().clone()),
                    FailurePolicy::Error => RelayOutcome::Failed(e),
                }
            }
        }
    }
}
