use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Creates a single-value channel for the event named `event`.
///
/// The slot side is handed to whatever observes events (a log subscription,
/// a callback); the waiter side is awaited with a deadline.
pub fn one_shot<T>(event: &'static str) -> (EventSlot<T>, EventWaiter<T>) {
    let (tx, rx) = oneshot::channel();
    let slot = EventSlot {
        event,
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let waiter = EventWaiter {
        event,
        rx,
        listener: None,
    };
    (slot, waiter)
}

/// Producer half. Cloneable so it can live inside `Fn` callbacks; only the
/// first `fulfil` across all clones delivers a value.
pub struct EventSlot<T> {
    event: &'static str,
    tx: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for EventSlot<T> {
    fn clone(&self) -> Self {
        Self {
            event: self.event,
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T> EventSlot<T> {
    /// Delivers `value` if nothing was delivered before and the waiter is
    /// still listening. Returns whether the value was accepted.
    pub fn fulfil(&self, value: T) -> bool {
        let sender = match self.tx.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        match sender {
            Some(tx) => {
                let delivered = tx.send(value).is_ok();
                debug!(event = self.event, delivered, "event slot fulfilled");
                delivered
            }
            None => false,
        }
    }

    pub fn is_open(&self) -> bool {
        match self.tx.lock() {
            Ok(guard) => guard.as_ref().is_some_and(|tx| !tx.is_closed()),
            Err(_) => false,
        }
    }
}

/// Consumer half. Dropping it, or finishing [`EventWaiter::wait`], stops the
/// attached listener task.
pub struct EventWaiter<T> {
    event: &'static str,
    rx: oneshot::Receiver<T>,
    listener: Option<JoinHandle<()>>,
}

impl<T> EventWaiter<T> {
    /// Ties the lifetime of `listener` to this waiter.
    pub fn with_listener(mut self, listener: JoinHandle<()>) -> Self {
        if let Some(previous) = self.listener.replace(listener) {
            previous.abort();
        }
        self
    }

    pub fn event(&self) -> &'static str {
        self.event
    }

    /// Waits for the first value, at most `deadline`.
    pub async fn wait(mut self, deadline: Duration) -> Result<T> {
        let outcome = tokio::time::timeout(deadline, &mut self.rx).await;
        self.deregister();

        match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(ClientError::ListenerClosed { event: self.event }),
            Err(_) => Err(ClientError::EventTimeout {
                event: self.event,
                waited: deadline,
            }),
        }
    }

    fn deregister(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }
}

impl<T> Drop for EventWaiter<T> {
    fn drop(&mut self) {
        self.deregister();
    }
}
