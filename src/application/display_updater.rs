// Display updater - Feeds snapshots into the speed chart
use crate::domain::readout::StatusReadout;
use crate::domain::series::{SeriesEntry, TimeSeries};
use crate::domain::telemetry::TelemetrySnapshot;
use chrono::{DateTime, Utc};

/// Something that can draw the actual/target speed chart
pub trait ChartSurface: Send {
    /// Replace the chart data in place
    fn replace_data(
        &mut self,
        labels: Vec<String>,
        actual: Vec<Option<f64>>,
        target: Vec<Option<f64>>,
    );

    /// Status panel shown beside the chart
    fn show_status(&mut self, _readout: StatusReadout) {}

    fn redraw(&mut self);
}

/// Append one reading to `series`, evicting the oldest entry when full.
///
/// Actual speed is charted in RPM, target speed as reported.
pub fn apply_reading(series: &mut TimeSeries, reading: &TelemetrySnapshot, at: DateTime<Utc>) {
    series.push(SeriesEntry::new(at, reading.actual_rpm(), reading.target_speed));
}

pub fn format_label(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%H:%M:%S%.3f").to_string()
}

/// Owns the time series for one display session and the surface it draws on.
pub struct DisplayUpdater<S: ChartSurface> {
    series: TimeSeries,
    surface: S,
}

impl<S: ChartSurface> DisplayUpdater<S> {
    pub fn new(surface: S, capacity: usize) -> Self {
        Self {
            series: TimeSeries::new(capacity),
            surface,
        }
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn apply_reading(&mut self, reading: &TelemetrySnapshot) {
        self.apply_reading_at(reading, Utc::now());
    }

    pub fn apply_reading_at(&mut self, reading: &TelemetrySnapshot, at: DateTime<Utc>) {
        apply_reading(&mut self.series, reading, at);

        let labels = self.series.iter().map(|e| format_label(&e.timestamp)).collect();
        self.surface.replace_data(
            labels,
            self.series.actual_values(),
            self.series.target_values(),
        );
        self.surface.show_status(StatusReadout::from_snapshot(reading));
        self.surface.redraw();
    }

    /// Poll loop callback; a missing snapshot leaves the last frame on screen
    pub fn on_data(&mut self, data: Option<TelemetrySnapshot>) {
        match data {
            Some(reading) => self.apply_reading(&reading),
            None => tracing::debug!(
                points = self.series.len(),
                "No new reading, keeping stale frame"
            ),
        }
    }
}
