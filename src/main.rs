// Main entry point - Dependency injection and server setup
use std::sync::Arc;

use motor_relay::application::display_updater::DisplayUpdater;
use motor_relay::application::poll_loop::start_polling;
use motor_relay::application::relay_service::RelayService;
use motor_relay::application::telemetry_source::TelemetrySource;
use motor_relay::infrastructure::chart_surface::SharedChart;
use motor_relay::infrastructure::config::{MonitorSource, load_config};
use motor_relay::infrastructure::device_client::DeviceClient;
use motor_relay::infrastructure::relay_client::RelayClient;
use motor_relay::presentation::app_state::AppState;
use motor_relay::presentation::router::build_router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_config()?;

    // Device client (infrastructure layer)
    let device = DeviceClient::new(&config.device.address, config.device.timeout());

    // Services (application layer)
    let relay_service = RelayService::new(Arc::new(device.clone()), config.relay.on_failure);
    let (chart, chart_view) =
        SharedChart::new(&config.monitor.actual_label, &config.monitor.target_label);

    let poller = if config.monitor.enabled {
        let source: Arc<dyn TelemetrySource> = match config.monitor.source {
            MonitorSource::Device => Arc::new(device.clone()),
            MonitorSource::Relay => Arc::new(RelayClient::new(
                config.monitor.relay_url.clone(),
                config.device.timeout(),
            )),
        };
        let mut display = DisplayUpdater::new(chart, config.monitor.capacity);
        Some(start_polling(source, config.monitor.period(), move |data| {
            display.on_data(data)
        }))
    } else {
        None
    };

    let state = Arc::new(AppState {
        relay_service,
        device,
        chart: chart_view,
    });

    // Build router (presentation layer)
    let router = build_router(state.clone(), &config.relay.allow_origin);

    // Start server
    let addr = config.relay.bind_addr()?;
    tracing::info!(
        %addr,
        device = %state.device.base_url(),
        on_failure = ?state.relay_service.policy(),
        "Starting motor relay"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(poller) = poller {
        poller.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
