//! View scopes: the lifetime of one rendered screen.
//!
//! Every navigation that lands on a screen opens a [`ViewScope`]. API
//! calls a view starts are spawned through its scope, and when the user
//! navigates away the scope is dropped and every call still in flight is
//! aborted. A result can therefore never arrive for a screen that is no
//! longer showing.

use std::future::Future;

use megamart_router::Destination;
use tokio::sync::oneshot;
use tokio::task::JoinSet;

/// Tasks tied to one displayed destination.
///
/// Dropping the scope aborts every task it spawned.
#[derive(Debug)]
pub struct ViewScope {
    destination: Destination,
    tasks: JoinSet<()>,
}

impl ViewScope {
    pub fn new(destination: Destination) -> Self {
        Self {
            destination,
            tasks: JoinSet::new(),
        }
    }

    /// The screen this scope belongs to.
    pub fn destination(&self) -> Destination {
        self.destination
    }

    /// Runs `task` for as long as this view is displayed.
    ///
    /// The returned receiver yields the task's output. If the view is left
    /// first, the task is aborted and the receiver reports
    /// [`RecvError`](oneshot::error::RecvError).
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<F>(&mut self, task: F) -> oneshot::Receiver<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.reap();
        let (tx, rx) = oneshot::channel();
        self.tasks.spawn(async move {
            // The view may have stopped listening; nothing to do then.
            let _ = tx.send(task.await);
        });
        rx
    }

    /// Number of spawned tasks that have not finished yet.
    pub fn in_flight(&mut self) -> usize {
        self.reap();
        self.tasks.len()
    }

    /// Drops finished tasks so a long-lived view does not accumulate them.
    fn reap(&mut self) {
        while self.tasks.try_join_next().is_some() {}
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        if !self.tasks.is_empty() {
            tracing::debug!(
                destination = %self.destination,
                tasks = self.tasks.len(),
                "leaving view, aborting in-flight calls"
            );
        }
        self.tasks.abort_all();
    }
}
