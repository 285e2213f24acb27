// HTTP client for the motor controller firmware
use crate::application::telemetry_source::{FetchError, TelemetrySource};
use crate::domain::setpoint::{ControlSetpoint, DeviceCommand};
use crate::domain::telemetry::{PidGains, TelemetrySnapshot};
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
pub struct DeviceClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

/// `192.168.1.121` becomes `http://192.168.1.121`; an explicit scheme is kept
pub fn base_url(address: &str) -> String {
    let address = address.trim().trim_end_matches('/');
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}

/// Fetch one status snapshot from the device at `address`
pub async fn fetch_status(
    address: &str,
    timeout: Duration,
) -> Result<TelemetrySnapshot, FetchError> {
    DeviceClient::new(address, timeout).fetch_status().await
}

pub(crate) fn classify(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() || (error.is_request() && error.status().is_none()) {
        // Refused, reset, or closed before any response arrived
        FetchError::Unreachable
    } else {
        FetchError::Other {
            message: error.to_string(),
        }
    }
}

/// GET `url` and decode a snapshot, mapping every failure onto `FetchError`
pub(crate) async fn get_snapshot(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<TelemetrySnapshot, FetchError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(classify)?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Upstream { status, body });
    }

    response.json::<TelemetrySnapshot>().await.map_err(classify)
}

impl DeviceClient {
    pub fn new(address: &str, timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), address, timeout)
    }

    pub fn with_client(client: reqwest::Client, address: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url(address),
            timeout,
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_status(&self) -> Result<TelemetrySnapshot, FetchError> {
        let url = format!("{}/status", self.base_url);
        get_snapshot(&self.client, &url, self.timeout).await
    }

    pub async fn send_pid(&self, kp: f64, ki: f64, kd: f64) -> Result<(), FetchError> {
        self.send_setpoint(ControlSetpoint::Pid(PidGains::new(kp, ki, kd))).await
    }

    pub async fn send_speed(&self, speed: f64) -> Result<(), FetchError> {
        self.send_setpoint(ControlSetpoint::Speed(speed)).await
    }

    /// Push a setpoint with a single GET. No retry; the outcome is logged
    /// and returned.
    pub async fn send_setpoint(&self, setpoint: ControlSetpoint) -> Result<(), FetchError> {
        let result = self.get_ok(setpoint.path(), &setpoint.query()).await;
        match &result {
            Ok(()) => tracing::info!(?setpoint, "Setpoint accepted"),
            Err(e) => tracing::error!(?setpoint, error = %e, "Setpoint update failed"),
        }
        result
    }

    pub async fn send_command(&self, command: DeviceCommand) -> Result<(), FetchError> {
        let result = self.get_ok(command.path(), &[]).await;
        match &result {
            Ok(()) => tracing::info!(%command, "Command accepted"),
            Err(e) => tracing::error!(%command, error = %e, "Command failed"),
        }
        result
    }

    async fn get_ok(&self, path: &str, query: &[(&str, String)]) -> Result<(), FetchError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Upstream { status, body });
        }

        Ok(())
    }
}

#[async_trait]
impl TelemetrySource for DeviceClient {
    async fn fetch(&self) -> Result<TelemetrySnapshot, FetchError> {
        self.fetch_status().await
    }

    fn describe(&self) -> String {
        format!("{}/status", self.base_url)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{closed_addr, spawn_hangup_server, spawn_server};
    use super::*;
    use crate::domain::telemetry::{Direction, sample_snapshot};
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    type Recorded = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

    fn recording_device(status: StatusCode) -> (Router, Recorded) {
        let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
        let mut router = Router::new();
        for path in ["setpid", "setspeed", "hold", "calibrate"] {
            let sink = recorded.clone();
            router = router.route(
                &format!("/{}", path),
                get(move |Query(query): Query<HashMap<String, String>>| {
                    let sink = sink.clone();
                    async move {
                        sink.lock().unwrap().push((path.to_string(), query));
                        status
                    }
                }),
            );
        }
        (router, recorded)
    }

    #[test]
    fn test_base_url() {
        assert_eq!(base_url("192.168.1.121"), "http://192.168.1.121");
        assert_eq!(base_url("http://127.0.0.1:8080/"), "http://127.0.0.1:8080");
    }

    #[tokio::test]
    async fn test_fetch_status() {
        let router =
            Router::new().route("/status", get(|| async { Json(sample_snapshot(1.0, 2.0)) }));
        let addr = spawn_server(router).await;

        let snapshot = fetch_status(&addr.to_string(), DEFAULT_TIMEOUT).await.unwrap();
        assert_eq!(snapshot, sample_snapshot(1.0, 2.0));
    }

    #[tokio::test]
    async fn test_slow_device_times_out() {
        let router = Router::new().route(
            "/status",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(sample_snapshot(1.0, 2.0))
            }),
        );
        let addr = spawn_server(router).await;
        let timeout = Duration::from_millis(200);

        let started = Instant::now();
        let result = fetch_status(&addr.to_string(), timeout).await;
        assert_eq!(result, Err(FetchError::Timeout));
        assert!(started.elapsed() < timeout + Duration::from_millis(800));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let router = Router::new().route(
            "/status",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );
        let addr = spawn_server(router).await;

        let result = fetch_status(&addr.to_string(), DEFAULT_TIMEOUT).await;
        assert_eq!(
            result,
            Err(FetchError::Upstream {
                status: 503,
                body: "busy".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_nothing_listening() {
        let addr = closed_addr().await;
        let result = fetch_status(&addr.to_string(), DEFAULT_TIMEOUT).await;
        assert_eq!(result, Err(FetchError::Unreachable));
    }

    #[tokio::test]
    async fn test_device_hangs_up_without_response() {
        let addr = spawn_hangup_server().await;
        let result = fetch_status(&addr.to_string(), DEFAULT_TIMEOUT).await;
        assert_eq!(result, Err(FetchError::Unreachable));
    }

    #[tokio::test]
    async fn test_idle_motor_status_decodes() {
        for (wire, expected) in [("STOPPED", Direction::Stopped), ("", Direction::Unknown)] {
            let body = format!(
                r#"{{"firmwareVersion":"1.0.3","serialNumber":"abc","calibrated":false,
                    "pid":{{"kp":1.00,"ki":0.00,"kd":0.00}},"direction":"{}",
                    "minSpeed":0.00,"maxSpeed":3000.00,"position":0,"actualSpeed":0.00,
                    "targetSpeed":0.00,"temperature":22.10,"humidity":41.00}}"#,
                wire
            );
            let router = Router::new().route(
                "/status",
                get(move || {
                    let body = body.clone();
                    async move { ([("content-type", "application/json")], body) }
                }),
            );
            let addr = spawn_server(router).await;

            let snapshot = fetch_status(&addr.to_string(), DEFAULT_TIMEOUT).await.unwrap();
            assert_eq!(snapshot.direction, expected);
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        // The firmware prints NaN for a failed sensor read
        let router = Router::new().route("/status", get(|| async { "{\"temperature\":nan}" }));
        let addr = spawn_server(router).await;

        let result = fetch_status(&addr.to_string(), DEFAULT_TIMEOUT).await;
        assert!(matches!(result, Err(FetchError::Other { .. })), "{:?}", result);
    }

    #[tokio::test]
    async fn test_send_speed_issues_one_get() {
        let (router, recorded) = recording_device(StatusCode::OK);
        let addr = spawn_server(router).await;
        let client = DeviceClient::new(&addr.to_string(), DEFAULT_TIMEOUT);

        client.send_speed(500.0).await.unwrap();

        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].0, "setspeed");
        assert_eq!(recorded[0].1.get("speed").map(String::as_str), Some("500"));
    }

    #[tokio::test]
    async fn test_send_pid_query() {
        let (router, recorded) = recording_device(StatusCode::OK);
        let addr = spawn_server(router).await;
        let client = DeviceClient::new(&addr.to_string(), DEFAULT_TIMEOUT);

        client.send_pid(2.0, 0.5, 0.125).await.unwrap();

        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        let (path, query) = &recorded[0];
        assert_eq!(path, "setpid");
        assert_eq!(query.get("kp").map(String::as_str), Some("2"));
        assert_eq!(query.get("ki").map(String::as_str), Some("0.5"));
        assert_eq!(query.get("kd").map(String::as_str), Some("0.125"));
    }

    #[tokio::test]
    async fn test_rejected_setpoint_is_an_error_not_a_panic() {
        let (router, recorded) = recording_device(StatusCode::BAD_REQUEST);
        let addr = spawn_server(router).await;
        let client = DeviceClient::new(&addr.to_string(), DEFAULT_TIMEOUT);

        let result = client.send_speed(500.0).await;
        assert!(matches!(result, Err(FetchError::Upstream { status: 400, .. })));
        assert_eq!(recorded.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_send_command() {
        let (router, recorded) = recording_device(StatusCode::OK);
        let addr = spawn_server(router).await;
        let client = DeviceClient::new(&addr.to_string(), DEFAULT_TIMEOUT);

        client.send_command(DeviceCommand::Hold).await.unwrap();
        client.send_command(DeviceCommand::Calibrate).await.unwrap();

        let paths: Vec<String> = recorded.lock().unwrap().iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(paths, vec!["hold", "calibrate"]);
    }

    #[tokio::test]
    async fn test_unreachable_setpoint() {
        let addr = closed_addr().await;
        let client = DeviceClient::new(&addr.to_string(), DEFAULT_TIMEOUT);
        assert_eq!(client.send_speed(10.0).await, Err(FetchError::Unreachable));
    }
}
