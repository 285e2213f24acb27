// Application layer - Polling, display and relay use cases
pub mod display_updater;
pub mod poll_loop;
pub mod relay_service;
pub mod telemetry_source;
