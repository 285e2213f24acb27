// Infrastructure layer - External dependencies and adapters
pub mod chart_surface;
pub mod config;
pub mod device_client;
pub mod http_response;
pub mod relay_client;
