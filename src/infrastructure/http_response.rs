// HTTP response utilities for relay payloads
use axum::{
    body::Body,
    http::{HeaderValue, Response, StatusCode, header},
};
use serde::Serialize;

pub const RELAY_SOURCE_HEADER: &str = "x-relay-source";

/// Serialize `data` as an uncached JSON response
pub fn json_response<T: Serialize>(data: &T) -> Result<Response<Body>, StatusCode> {
    json_response_from(data, None)
}

/// JSON response tagged with where the payload came from (`live` / `fallback`)
pub fn relayed_json_response<T: Serialize>(
    data: &T,
    source: &'static str,
) -> Result<Response<Body>, StatusCode> {
    json_response_from(data, Some(source))
}

fn json_response_from<T: Serialize>(
    data: &T,
    source: Option<&'static str>,
) -> Result<Response<Body>, StatusCode> {
    let bytes = serde_json::to_vec(data).map_err(|e| {
        tracing::error!("JSON serialization error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CACHE_CONTROL, "no-store")
        .header(header::CONTENT_LENGTH, HeaderValue::from(bytes.len()));

    if let Some(source) = source {
        response_builder = response_builder.header(RELAY_SOURCE_HEADER, source);
    }

    response_builder.body(Body::from(bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Plain-text response with an explicit status
pub fn text_response(status: StatusCode, message: impl Into<String>) -> Response<Body> {
    let mut response = Response::new(Body::from(message.into()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
