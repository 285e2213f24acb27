// Poll loop - Fetch, hand over, wait, repeat
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::telemetry::TelemetrySnapshot;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Stop handle for a running poll loop.
///
/// Dropping the handle also stops the loop.
pub struct PollHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Ask the loop to stop; it exits at its next suspension point
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the loop and wait for it to exit
    pub async fn shutdown(self) {
        self.stop();
        if let Err(e) = self.task.await {
            tracing::error!("Poll loop ended abnormally: {}", e);
        }
    }
}

/// Start polling `source` every `period`.
///
/// Each cycle awaits one fetch, calls `on_data` with the snapshot (or `None`
/// if the fetch failed) and then sleeps for `period`. The period runs from
/// the end of a cycle, so a slow fetch delays the next one instead of
/// overlapping with it. Failures are logged and never end the loop.
pub fn start_polling<F>(
    source: Arc<dyn TelemetrySource>,
    period: Duration,
    mut on_data: F,
) -> PollHandle
where
    F: FnMut(Option<TelemetrySnapshot>) + Send + 'static,
{
    let (stop_tx, mut stop_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let origin = source.describe();
        tracing::info!(
            source = %origin,
            period_ms = period.as_millis() as u64,
            "Polling started"
        );

        loop {
            if *stop_rx.borrow() {
                break;
            }

            // A fetch still in flight when stop arrives is dropped, not delivered
            let result = tokio::select! {
                _ = stop_rx.changed() => break,
                result = source.fetch() => result,
            };

            match result {
                Ok(snapshot) => {
                    tracing::debug!(source = %origin, "Status received");
                    on_data(Some(snapshot));
                }
                Err(e) => {
                    tracing::warn!(source = %origin, error = %e, "Status fetch failed");
                    on_data(None);
                }
            }

            tokio::select! {
                _ = stop_rx.changed() => break,
                _ = tokio::time::sleep(period) => {}
            }
        }

        tracing::info!(source = %origin, "Polling stopped");
    });

    PollHandle { stop_tx, task }
}
