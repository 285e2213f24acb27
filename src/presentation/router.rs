// Route table and middleware
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    chart_frame, device_command, health_check, relay_data, set_pid, set_speed,
};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Display pages are served from another origin, so every route carries CORS headers
pub fn cors_layer(allow_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET]);
    if allow_origin == "*" {
        return layer.allow_origin(Any);
    }

    match HeaderValue::from_str(allow_origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!("Invalid allow_origin {:?} ({}), allowing any origin", allow_origin, e);
            layer.allow_origin(Any)
        }
    }
}

pub fn build_router(state: Arc<AppState>, allow_origin: &str) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/data", get(relay_data))
        .route("/chart", get(chart_frame))
        .route("/control/pid", get(set_pid))
        .route("/control/speed", get(set_speed))
        .route("/control/:command", get(device_command))
        .layer(cors_layer(allow_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
