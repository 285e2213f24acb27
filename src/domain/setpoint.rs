// Control values pushed to the motor controller
use super::telemetry::PidGains;
use std::fmt;
use std::str::FromStr;

/// A setpoint taken from a control input at the moment it changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlSetpoint {
    Pid(PidGains),
    Speed(f64),
}

impl ControlSetpoint {
    pub fn path(&self) -> &'static str {
        match self {
            ControlSetpoint::Pid(_) => "setpid",
            ControlSetpoint::Speed(_) => "setspeed",
        }
    }

    /// Query parameters in the order the device expects them
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            ControlSetpoint::Pid(gains) => vec![
                ("kp", gains.kp.to_string()),
                ("ki", gains.ki.to_string()),
                ("kd", gains.kd.to_string()),
            ],
            ControlSetpoint::Speed(speed) => vec![("speed", speed.to_string())],
        }
    }
}

/// Motion commands the firmware exposes as bare GET routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCommand {
    Hold,
    Free,
    Brake,
    Release,
    Calibrate,
}

impl DeviceCommand {
    pub fn path(&self) -> &'static str {
        match self {
            DeviceCommand::Hold => "hold",
            DeviceCommand::Free => "free",
            DeviceCommand::Brake => "brake",
            DeviceCommand::Release => "release",
            DeviceCommand::Calibrate => "calibrate",
        }
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown device command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for DeviceCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hold" => Ok(DeviceCommand::Hold),
            "free" => Ok(DeviceCommand::Free),
            "brake" => Ok(DeviceCommand::Brake),
            "release" => Ok(DeviceCommand::Release),
            "calibrate" => Ok(DeviceCommand::Calibrate),
            _ => Err(UnknownCommand(s.to_string())),
        }
    }
}
