// Telemetry domain model
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;

/// PID tuning constants reported by (and sent to) the controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    // The firmware reports the encoder direction as CW / CCW
    #[serde(rename = "clockwise", alias = "CW", alias = "cw")]
    Clockwise,
    #[serde(
        rename = "counter-clockwise",
        alias = "CCW",
        alias = "ccw",
        alias = "counterclockwise"
    )]
    CounterClockwise,
    // Written by the firmware when the target speed is zero
    #[serde(rename = "stopped", alias = "STOPPED")]
    Stopped,
    /// Anything else, including the empty string sent before the first move
    #[serde(rename = "unknown", other)]
    Unknown,
}

/// A single point-in-time reading of the motor controller.
///
/// Readings the device could not take are `None` and travel as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    pub firmware_version: String,
    pub serial_number: String,
    pub calibrated: bool,
    pub pid: PidGains,
    pub direction: Direction,
    #[serde(deserialize_with = "speed_bound")]
    pub min_speed: i64,
    #[serde(deserialize_with = "speed_bound")]
    pub max_speed: i64,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub actual_speed: Option<f64>,
    #[serde(default)]
    pub target_speed: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default, rename = "actualSpeedRPM", skip_serializing_if = "Option::is_none")]
    pub actual_speed_rpm: Option<f64>,
    #[serde(default, rename = "targetSpeedRPM", skip_serializing_if = "Option::is_none")]
    pub target_speed_rpm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TelemetrySnapshot {
    /// Actual speed converted to RPM for charting
    pub fn actual_rpm(&self) -> Option<f64> {
        self.actual_speed.map(|speed| speed * 60.0)
    }
}

/// Speed bounds are printed as doubles by the firmware ("0.00").
fn speed_bound<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.trunc() as i64)
}

static FALLBACK_SNAPSHOT: LazyLock<TelemetrySnapshot> = LazyLock::new(|| TelemetrySnapshot {
    firmware_version: "unavailable".to_string(),
    serial_number: "unknown".to_string(),
    calibrated: false,
    pid: PidGains::new(0.0, 0.0, 0.0),
    direction: Direction::Unknown,
    min_speed: 0,
    max_speed: 0,
    position: None,
    actual_speed: None,
    target_speed: None,
    temperature: None,
    humidity: None,
    actual_speed_rpm: None,
    target_speed_rpm: None,
    message: Some("device unreachable".to_string()),
});

/// Snapshot served in place of live data when the device cannot be reached
pub fn fallback_snapshot() -> &'static TelemetrySnapshot {
    &FALLBACK_SNAPSHOT
}

#[cfg(test)]
pub(crate) fn sample_snapshot(actual_speed: f64, target_speed: f64) -> TelemetrySnapshot {
    TelemetrySnapshot {
        firmware_version: "1.0.3".to_string(),
        serial_number: "6f1c2a9e-5b7d-4f0e-9a51-0c3d8e2b7a14".to_string(),
        calibrated: true,
        pid: PidGains::new(1.0, 0.5, 0.1),
        direction: Direction::Clockwise,
        min_speed: 0,
        max_speed: 3000,
        position: Some(1024),
        actual_speed: Some(actual_speed),
        target_speed: Some(target_speed),
        temperature: Some(24.43),
        humidity: Some(34.67),
        actual_speed_rpm: None,
        target_speed_rpm: None,
        message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_firmware_status() {
        let body = r#"{
            "firmwareVersion":"1.0.3",
            "serialNumber":"6f1c2a9e-5b7d-4f0e-9a51-0c3d8e2b7a14",
            "calibrated":true,
            "pid":{"kp":1.00,"ki":0.50,"kd":0.10},
            "direction":"CCW",
            "minSpeed":0.00,
            "maxSpeed":2950.75,
            "position":812,
            "actualSpeed":1.00,
            "targetSpeed":2.00,
            "actualSpeedRPM":60.00,
            "targetSpeedRPM":120.00,
            "temperature":24.43,
            "humidity":34.67,
            "message":""
        }"#;

        let snapshot: TelemetrySnapshot = serde_json::from_str(body).unwrap();
        assert_eq!(snapshot.direction, Direction::CounterClockwise);
        assert_eq!(snapshot.min_speed, 0);
        assert_eq!(snapshot.max_speed, 2950);
        assert_eq!(snapshot.position, Some(812));
        assert_eq!(snapshot.pid, PidGains::new(1.0, 0.5, 0.1));
        assert_eq!(snapshot.actual_speed_rpm, Some(60.0));
        assert_eq!(snapshot.message.as_deref(), Some(""));
        assert_eq!(snapshot.actual_rpm(), Some(60.0));
    }

    #[test]
    fn test_unknown_readings() {
        let body = r#"{
            "firmwareVersion":"1.0.3",
            "serialNumber":"abc",
            "calibrated":false,
            "pid":{"kp":1,"ki":0,"kd":0},
            "direction":"clockwise",
            "minSpeed":0,
            "maxSpeed":100,
            "position":null,
            "actualSpeed":null,
            "temperature":null
        }"#;

        let snapshot: TelemetrySnapshot = serde_json::from_str(body).unwrap();
        assert_eq!(snapshot.position, None);
        assert_eq!(snapshot.actual_speed, None);
        assert_eq!(snapshot.target_speed, None);
        assert_eq!(snapshot.humidity, None);
        assert_eq!(snapshot.actual_rpm(), None);
    }

    fn status_with_direction(direction: &str) -> String {
        format!(
            r#"{{"firmwareVersion":"1.0.3","serialNumber":"abc","calibrated":true,
                "pid":{{"kp":1.00,"ki":0.00,"kd":0.00}},"direction":"{}",
                "minSpeed":0.00,"maxSpeed":100.00,"position":0,
                "actualSpeed":0.00,"targetSpeed":0.00,"temperature":21.50,"humidity":40.00}}"#,
            direction
        )
    }

    #[test]
    fn test_stopped_and_unset_direction() {
        let stopped: TelemetrySnapshot =
            serde_json::from_str(&status_with_direction("STOPPED")).unwrap();
        assert_eq!(stopped.direction, Direction::Stopped);

        // Encoder direction is empty until the motor first turns
        let unset: TelemetrySnapshot = serde_json::from_str(&status_with_direction("")).unwrap();
        assert_eq!(unset.direction, Direction::Unknown);

        let odd: TelemetrySnapshot = serde_json::from_str(&status_with_direction("SPIN")).unwrap();
        assert_eq!(odd.direction, Direction::Unknown);

        let json = serde_json::to_value(&stopped).unwrap();
        assert_eq!(json["direction"], "stopped");
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(sample_snapshot(1.0, 2.0)).unwrap();
        assert_eq!(json["firmwareVersion"], "1.0.3");
        assert_eq!(json["direction"], "clockwise");
        assert_eq!(json["pid"]["kd"], 0.1);
        assert_eq!(json["actualSpeed"], 1.0);
        // Optional firmware extras are left out rather than sent as null
        assert!(json.get("actualSpeedRPM").is_none());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_fallback_is_well_formed() {
        let fallback = fallback_snapshot();
        assert!(fallback.min_speed <= fallback.max_speed);
        assert_eq!(fallback.actual_speed, None);

        let json = serde_json::to_string(fallback).unwrap();
        let parsed: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(&parsed, fallback);
    }
}
