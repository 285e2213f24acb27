// Application state for HTTP handlers
use crate::application::relay_service::RelayService;
use crate::infrastructure::chart_surface::ChartView;
use crate::infrastructure::device_client::DeviceClient;

#[derive(Clone)]
pub struct AppState {
    pub relay_service: RelayService,
    pub device: DeviceClient,
    pub chart: ChartView,
}
