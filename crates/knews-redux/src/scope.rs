//! Execution scope for the pipeline and for side effects
//!
//! A `Scope` is owned by whoever creates the store (a view model or a test).
//! Cancelling it aborts every task spawned on it and closes every dispatcher
//! bound to it, so no result produced after teardown reaches a store.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::{AbortHandle, JoinHandle};

/// Cloneable handle to a cancellable group of tasks
#[derive(Clone)]
pub struct Scope {
    inner: Arc<Inner>,
}

struct Inner {
    handle: Handle,
    cancelled: AtomicBool,
    notify: Notify,
    tasks: Mutex<Vec<AbortHandle>>,
}

impl Scope {
    /// Create a scope spawning onto the given runtime
    pub fn new(handle: Handle) -> Self {
        Self {
            inner: Arc::new(Inner {
                handle,
                cancelled: AtomicBool::new(false),
                notify: Notify::new(),
                tasks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Create a scope on the runtime of the calling task
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Spawn a task owned by this scope
    ///
    /// Returns `None` when the scope is already cancelled; the future is
    /// dropped without being polled.
    pub fn spawn<F>(&self, future: F) -> Option<JoinHandle<F::Output>>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        if self.is_cancelled() {
            log::debug!("Scope: refusing to spawn, scope is cancelled");
            return None;
        }

        let task = self.inner.handle.spawn(future);

        let mut tasks = self
            .inner
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|t| !t.is_finished());
        tasks.push(task.abort_handle());

        // cancel() may have drained the list between the check above and the push
        if self.is_cancelled() {
            task.abort();
        }

        Some(task)
    }

    /// Cancel the scope and abort all of its outstanding tasks
    pub fn cancel(&self) {
        if self.inner.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }

        let tasks = std::mem::take(
            &mut *self
                .inner
                .tasks
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        log::debug!("Scope: cancelled, aborting {} task(s)", tasks.len());
        for task in tasks {
            task.abort();
        }

        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once the scope is cancelled
    pub async fn cancelled(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
