// HTTP request handlers
use crate::application::relay_service::RelayOutcome;
use crate::application::telemetry_source::FetchError;
use crate::domain::setpoint::DeviceCommand;
use crate::infrastructure::http_response::{json_response, relayed_json_response, text_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct PidQuery {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

#[derive(Deserialize)]
pub struct SpeedQuery {
    pub speed: f64,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Relay the device status to browser pages
pub async fn relay_data(State(state): State<Arc<AppState>>) -> Response {
    let result = match state.relay_service.relay_status().await {
        RelayOutcome::Live(snapshot) => relayed_json_response(&snapshot, "live"),
        RelayOutcome::Fallback(snapshot) => relayed_json_response(&snapshot, "fallback"),
        RelayOutcome::Failed(_) => {
            return text_response(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching data");
        }
    };

    match result {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Current speed chart and status panel
pub async fn chart_frame(State(state): State<Arc<AppState>>) -> Response {
    match json_response(&state.chart.frame()) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

pub async fn set_pid(
    Query(query): Query<PidQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    control_response(state.device.send_pid(query.kp, query.ki, query.kd).await)
}

pub async fn set_speed(
    Query(query): Query<SpeedQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    control_response(state.device.send_speed(query.speed).await)
}

/// hold / free / brake / release / calibrate
pub async fn device_command(
    Path(command): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let command: DeviceCommand = match command.parse() {
        Ok(command) => command,
        Err(e) => return text_response(StatusCode::BAD_REQUEST, e.to_string()),
    };
    control_response(state.device.send_command(command).await)
}

fn control_response(result: Result<(), FetchError>) -> Response {
    match result {
        Ok(()) => text_response(StatusCode::OK, "ok"),
        Err(e) => text_response(StatusCode::BAD_GATEWAY, e.to_string()),
    }
}
