use crate::infrastructure::device_client::DEFAULT_TIMEOUT;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub device: DeviceSettings,
    pub relay: RelaySettings,
    pub monitor: MonitorSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DeviceSettings {
    /// Host (and optional port) of the motor controller
    pub address: String,
    pub timeout_ms: u64,
}

impl DeviceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            address: "192.168.1.121".to_string(),
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
        }
    }
}

/// What `/data` answers when the device cannot be read
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// 500 with a plain-text error
    #[default]
    Error,
    /// 200 with the fixed fallback snapshot
    Fallback,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RelaySettings {
    pub host: String,
    pub port: u16,
    pub on_failure: FailurePolicy,
    pub allow_origin: String,
}

impl RelaySettings {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            on_failure: FailurePolicy::Error,
            allow_origin: "*".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MonitorSource {
    #[default]
    Device,
    Relay,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MonitorSettings {
    pub enabled: bool,
    pub source: MonitorSource,
    pub relay_url: String,
    pub period_ms: u64,
    pub capacity: usize,
    pub actual_label: String,
    pub target_label: String,
}

impl MonitorSettings {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            source: MonitorSource::Device,
            relay_url: "http://localhost:3000/data".to_string(),
            period_ms: 1000,
            capacity: 100,
            actual_label: "Actual Speed".to_string(),
            target_label: "Target Speed".to_string(),
        }
    }
}

/// Load `config/relay.toml` (optional), overridden by `MOTOR_RELAY__SECTION__KEY`
pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/relay").required(false))
        .add_source(
            config::Environment::with_prefix("MOTOR_RELAY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}
