// In-process chart surface published over HTTP
use crate::application::display_updater::ChartSurface;
use crate::domain::readout::StatusReadout;
use serde::Serialize;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartFrame {
    pub actual_label: String,
    pub target_label: String,
    pub labels: Vec<String>,
    pub actual: Vec<Option<f64>>,
    pub target: Vec<Option<f64>>,
    /// Number of redraws so far
    pub revision: u64,
    pub status: Option<StatusReadout>,
}

/// Write side of the chart, owned by the display updater.
///
/// Data written through `replace_data` stays private until `redraw`
/// publishes it to every `ChartView`.
pub struct SharedChart {
    pending: ChartFrame,
    published: Arc<RwLock<ChartFrame>>,
}

/// Read side of the chart, cloned into the HTTP handlers
#[derive(Clone)]
pub struct ChartView {
    published: Arc<RwLock<ChartFrame>>,
}

impl SharedChart {
    pub fn new(actual_label: &str, target_label: &str) -> (Self, ChartView) {
        let frame = ChartFrame {
            actual_label: actual_label.to_string(),
            target_label: target_label.to_string(),
            ..ChartFrame::default()
        };
        let published = Arc::new(RwLock::new(frame.clone()));
        let view = ChartView {
            published: published.clone(),
        };
        (
            Self {
                pending: frame,
                published,
            },
            view,
        )
    }
}

impl ChartSurface for SharedChart {
    fn replace_data(
        &mut self,
        labels: Vec<String>,
        actual: Vec<Option<f64>>,
        target: Vec<Option<f64>>,
    ) {
        self.pending.labels = labels;
        self.pending.actual = actual;
        self.pending.target = target;
    }

    fn show_status(&mut self, readout: StatusReadout) {
        self.pending.status = Some(readout);
    }

    fn redraw(&mut self) {
        self.pending.revision += 1;
        let mut published = self.published.write().unwrap_or_else(|e| e.into_inner());
        *published = self.pending.clone();
    }
}

impl ChartView {
    /// Frame as of the last redraw
    pub fn frame(&self) -> ChartFrame {
        self.published.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
