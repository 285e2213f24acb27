// Domain layer - Motor controller telemetry and control values
pub mod readout;
pub mod series;
pub mod setpoint;
pub mod telemetry;
