//! Background task supervision
//!
//! The reminder worker runs on the tokio runtime next to the UI loop.
//! Shutdown is cooperative through a shared [`CancellationToken`].

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::core::AppState;
use crate::services::reminder::{Reminder, ReminderWorker};

/// Handles to the running background tasks
pub struct BackgroundTasks {
    cancel: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl BackgroundTasks {
    /// Spawn all background workers. The returned receiver delivers
    /// due reminders to the UI.
    pub fn spawn(state: &AppState) -> (Self, mpsc::UnboundedReceiver<Reminder>) {
        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::unbounded_channel();

        let worker = ReminderWorker::new(state.storage.clone(), tx);
        let handle = tokio::spawn(worker.run(cancel.child_token()));

        (Self { cancel, handles: vec![handle] }, rx)
    }

    /// Cancel every worker and wait for them to finish
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for handle in self.handles {
            let _ = handle.await;
        }
        info!("Background tasks stopped");
    }
}
