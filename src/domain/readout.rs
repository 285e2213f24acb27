// Human-readable status panel derived from a snapshot
use super::telemetry::{Direction, TelemetrySnapshot};
use serde::Serialize;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReadout {
    pub firmware_version: String,
    pub serial_number: String,
    pub calibrated: String,
    pub kp: String,
    pub ki: String,
    pub kd: String,
    pub direction: String,
    pub min_speed: String,
    pub max_speed: String,
    pub position: String,
    pub actual_speed: String,
    pub target_speed: String,
    pub temperature: String,
    pub humidity: String,
}

impl StatusReadout {
    pub fn from_snapshot(snapshot: &TelemetrySnapshot) -> Self {
        let direction = match snapshot.direction {
            Direction::Clockwise => "Clockwise",
            Direction::CounterClockwise => "Counter-clockwise",
            Direction::Stopped => "Stopped",
            Direction::Unknown => NOT_AVAILABLE,
        };

        Self {
            firmware_version: snapshot.firmware_version.clone(),
            serial_number: snapshot.serial_number.clone(),
            calibrated: if snapshot.calibrated { "Yes" } else { "No" }.to_string(),
            kp: format!("{}", snapshot.pid.kp.round()),
            ki: format!("{}", snapshot.pid.ki.round()),
            kd: format!("{}", snapshot.pid.kd.round()),
            direction: direction.to_string(),
            min_speed: snapshot.min_speed.to_string(),
            max_speed: snapshot.max_speed.to_string(),
            position: snapshot
                .position
                .map(|p| p.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            actual_speed: format_fixed(snapshot.actual_rpm(), ""),
            target_speed: format_fixed(snapshot.target_speed, ""),
            temperature: format_fixed(snapshot.temperature, "°C"),
            humidity: format_fixed(snapshot.humidity, "%"),
        }
    }
}

fn format_fixed(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.2}{}", v, unit),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::{fallback_snapshot, sample_snapshot};

    #[test]
    fn test_readout_formatting() {
        let readout = StatusReadout::from_snapshot(&sample_snapshot(1.0, 2.0));
        assert_eq!(readout.calibrated, "Yes");
        assert_eq!(readout.direction, "Clockwise");
        assert_eq!(readout.position, "1024");
        assert_eq!(readout.actual_speed, "60.00");
        assert_eq!(readout.target_speed, "2.00");
        assert_eq!(readout.temperature, "24.43°C");
        assert_eq!(readout.humidity, "34.67%");
        assert_eq!(readout.kp, "1");
        assert_eq!(readout.ki, "1");
        assert_eq!(readout.kd, "0");
    }

    #[test]
    fn test_unknown_values_render_as_not_available() {
        let readout = StatusReadout::from_snapshot(fallback_snapshot());
        assert_eq!(readout.calibrated, "No");
        assert_eq!(readout.direction, "N/A");
        assert_eq!(readout.position, "N/A");
        assert_eq!(readout.actual_speed, "N/A");
        assert_eq!(readout.temperature, "N/A");
        assert_eq!(readout.humidity, "N/A");
    }
}
