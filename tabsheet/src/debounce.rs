//! Trailing-edge debouncer.
//!
//! A coalescing queue of depth one: every signal cancels the pending timer and
//! schedules a new one, so a burst settles into a single value delivered after
//! the quiet period. Settled values are delivered on a channel, which lets the
//! host event loop pick them up alongside its other events.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Receiver half for settled values.
pub type Settled<T> = mpsc::UnboundedReceiver<T>;

/// Debounces values onto a channel.
///
/// Cheap to clone; clones share the pending timer.
#[derive(Clone)]
pub struct Debouncer<T> {
    inner: Arc<DebouncerInner<T>>,
}

struct DebouncerInner<T> {
    handle: Handle,
    window: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer bound to the current tokio runtime.
    ///
    /// Fails when called outside a runtime.
    pub fn new(window: Duration) -> Result<(Self, Settled<T>), TryCurrentError> {
        let handle = Handle::try_current()?;
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            inner: Arc::new(DebouncerInner {
                handle,
                window,
                tx,
                pending: Mutex::new(None),
            }),
        };
        Ok((debouncer, rx))
    }

    /// Record a signal. Restarts the quiet period; the latest value wins.
    pub fn signal(&self, value: T) {
        let mut pending = self.pending();
        if let Some(task) = pending.take() {
            task.abort();
        }

        let tx = self.inner.tx.clone();
        let window = self.inner.window;
        *pending = Some(self.inner.handle.spawn(async move {
            tokio::time::sleep(window).await;
            // Receiver gone means the owner was torn down.
            let _ = tx.send(value);
        }));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&self) {
        if let Some(task) = self.pending().take() {
            task.abort();
        }
    }

    /// Whether a value is waiting for its quiet period to end.
    pub fn is_pending(&self) -> bool {
        self.pending().as_ref().is_some_and(|task| !task.is_finished())
    }

    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
