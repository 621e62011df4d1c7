//! Promise handles and the settle-once state machine
//!
//! A promise moves `Pending -> Resolved` or `Pending -> Rejected` and
//! never again. [`Settlement`] owns the host's callback pair and enforces
//! that only one of them is ever called, and only once.

use std::fmt;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::SettleError;

/// Lifecycle of one asynchronous call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromiseState {
    Pending,
    Resolved,
    Rejected,
}

impl fmt::Display for PromiseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Resolved => write!(f, "resolved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

type Callback = Box<dyn FnOnce(String) + Send>;

/// Host-owned `resolve`/`reject` pair for one asynchronous call
pub struct PromiseHandle {
    resolve: Callback,
    reject: Callback,
}

impl PromiseHandle {
    pub fn new<R, J>(resolve: R, reject: J) -> Self
    where
        R: FnOnce(String) + Send + 'static,
        J: FnOnce(String) + Send + 'static,
    {
        Self {
            resolve: Box::new(resolve),
            reject: Box::new(reject),
        }
    }
}

impl fmt::Debug for PromiseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromiseHandle").finish_non_exhaustive()
    }
}

/// Guard that settles a [`PromiseHandle`] exactly once
///
/// A second `resolve`/`reject` is a no-op that reports
/// [`SettleError::AlreadySettled`]. Dropping a still-pending settlement
/// rejects the promise, so a task that disappears never leaves the host
/// waiting forever.
#[derive(Debug)]
pub struct Settlement {
    export: String,
    handle: Option<PromiseHandle>,
    state: PromiseState,
}

impl Settlement {
    pub fn new(export: impl Into<String>, handle: PromiseHandle) -> Self {
        Self {
            export: export.into(),
            handle: Some(handle),
            state: PromiseState::Pending,
        }
    }

    pub fn state(&self) -> PromiseState {
        self.state
    }

    pub fn resolve(&mut self, value: String) -> Result<(), SettleError> {
        let handle = self.take(PromiseState::Resolved)?;
        debug!(export = %self.export, "Settlement::resolve: called");
        (handle.resolve)(value);
        Ok(())
    }

    pub fn reject(&mut self, reason: String) -> Result<(), SettleError> {
        let handle = self.take(PromiseState::Rejected)?;
        debug!(export = %self.export, %reason, "Settlement::reject: called");
        (handle.reject)(reason);
        Ok(())
    }

    fn take(&mut self, next: PromiseState) -> Result<PromiseHandle, SettleError> {
        match self.handle.take() {
            Some(handle) => {
                self.state = next;
                Ok(handle)
            }
            None => {
                warn!(export = %self.export, state = %self.state, attempted = %next, "Ignoring second settle");
                Err(SettleError::AlreadySettled(self.state))
            }
        }
    }
}

impl Drop for Settlement {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let reason = format!("{} task ended before settling", self.export);
            warn!(export = %self.export, "Rejecting promise dropped while pending");
            let _ = self.reject(reason);
        }
    }
}

/// Promise object handed back to a native host
///
/// Created together with its [`PromiseHandle`]; awaiting [`settled`]
/// yields `Ok(value)` on resolve and `Err(reason)` on reject.
///
/// [`settled`]: HostPromise::settled
#[derive(Debug)]
pub struct HostPromise {
    rx: oneshot::Receiver<Result<String, String>>,
}

impl HostPromise {
    /// A fresh pending promise and the handle that completes it
    pub fn pending() -> (Self, PromiseHandle) {
        let (tx, rx) = oneshot::channel();
        let tx = Arc::new(Mutex::new(Some(tx)));
        let reject_tx = Arc::clone(&tx);

        let handle = PromiseHandle::new(
            move |value| send_once(&tx, Ok(value)),
            move |reason| send_once(&reject_tx, Err(reason)),
        );
        (Self { rx }, handle)
    }

    /// Wait for the promise to settle
    pub async fn settled(self) -> Result<String, String> {
        self.rx
            .await
            .unwrap_or_else(|_| Err("promise handle dropped without settling".to_string()))
    }
}

fn send_once(
    slot: &Mutex<Option<oneshot::Sender<Result<String, String>>>>,
    outcome: Result<String, String>,
) {
    let sender = slot.lock().unwrap_or_else(|e| e.into_inner()).take();
    if let Some(sender) = sender {
        // The host may have stopped waiting; that is not our failure
        let _ = sender.send(outcome);
    }
}
