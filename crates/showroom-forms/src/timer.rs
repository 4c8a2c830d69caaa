//! Cancelable delayed tasks.
//!
//! A [`DelayedTask`] owns at most one pending piece of work that runs after
//! a delay on the tokio runtime. Scheduling again cancels the pending work
//! first, which gives both debounce (re-arm on every input) and
//! restart-on-show (toast dismissal) semantics. Dropping the handle cancels
//! the pending work, so a disposed form never mutates state later.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a single restartable delayed task.
#[derive(Debug, Default)]
pub struct DelayedTask {
    handle: Option<JoinHandle<()>>,
}

impl DelayedTask {
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Runs `work` after `delay`, canceling whatever was pending before.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            work.await;
        }));
    }

    /// Cancels the pending work, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Returns `true` while scheduled work has not yet finished or been canceled.
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
