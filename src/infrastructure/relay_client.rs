// Telemetry source that reads through a relay's /data route
use crate::application::telemetry_source::{FetchError, TelemetrySource};
use crate::domain::telemetry::TelemetrySnapshot;
use crate::infrastructure::device_client::get_snapshot;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RelayClient {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl RelayClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TelemetrySource for RelayClient {
    async fn fetch(&self) -> Result<TelemetrySnapshot, FetchError> {
        get_snapshot(&self.client, &self.url, self.timeout).await
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
