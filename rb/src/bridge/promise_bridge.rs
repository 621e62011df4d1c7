//! Asynchronous call adapter (promise bridge)
//!
//! `call` returns a pending promise at once and runs the export body on a
//! detached tokio task. The body runs inside a catch-unwind boundary and
//! its outcome is reported through a [`Settlement`], so the host sees
//! exactly one resolve or reject whatever happens inside.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::host::HostValue;

use super::error::panic_message;
use super::{BridgeError, HostPromise, PromiseHandle, Settlement};

/// Body of an export that completes later through a promise
#[async_trait]
pub trait AsyncExport: Send + Sync {
    async fn run(&self, args: Vec<HostValue>) -> Result<String, BridgeError>;
}

/// Runs an [`AsyncExport`] behind the promise contract
pub struct PromiseBridge {
    name: String,
    task: Arc<dyn AsyncExport>,
    runtime: Handle,
}

impl PromiseBridge {
    pub fn new(name: impl Into<String>, task: Arc<dyn AsyncExport>, runtime: Handle) -> Self {
        Self {
            name: name.into(),
            task,
            runtime,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start the export and hand back a pending promise
    pub fn call(&self, args: Vec<HostValue>) -> HostPromise {
        let (promise, handle) = HostPromise::pending();
        self.call_with(handle, args);
        promise
    }

    /// Start the export, completing a host-supplied handle
    ///
    /// Returns as soon as the task is spawned.
    pub fn call_with(&self, handle: PromiseHandle, args: Vec<HostValue>) {
        debug!(export = %self.name, args = args.len(), "PromiseBridge::call_with: called");
        let mut settlement = Settlement::new(self.name.clone(), handle);
        let task = Arc::clone(&self.task);
        let name = self.name.clone();

        self.runtime.spawn(async move {
            let outcome = AssertUnwindSafe(task.run(args)).catch_unwind().await;

            let settled = match outcome {
                Ok(Ok(html)) => settlement.resolve(html),
                Ok(Err(err)) => {
                    warn!(export = %name, error = %err, "Export failed, rejecting");
                    settlement.reject(err.to_string())
                }
                Err(payload) => {
                    let err = BridgeError::Panic {
                        export: name.clone(),
                        message: panic_message(&*payload),
                    };
                    warn!(export = %name, error = %err, "Export panicked, rejecting");
                    settlement.reject(err.to_string())
                }
            };

            if let Err(e) = settled {
                warn!(export = %name, error = %e, "Settlement refused");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::PromiseState;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    struct Fixed(Result<&'static str, &'static str>);

    #[async_trait]
    impl AsyncExport for Fixed {
        async fn run(&self, _args: Vec<HostValue>) -> Result<String, BridgeError> {
            match self.0 {
                Ok(v) => Ok(v.to_string()),
                Err(e) => Err(BridgeError::Panic {
                    export: "fixed".to_string(),
                    message: e.to_string(),
                }),
            }
        }
    }

    struct Panics;

    #[async_trait]
    impl AsyncExport for Panics {
        async fn run(&self, _args: Vec<HostValue>) -> Result<String, BridgeError> {
            tokio::task::yield_now().await;
            panic!("task blew up")
        }
    }

    struct Gated(Arc<Notify>);

    #[async_trait]
    impl AsyncExport for Gated {
        async fn run(&self, _args: Vec<HostValue>) -> Result<String, BridgeError> {
            self.0.notified().await;
            Ok("released".to_string())
        }
    }

    struct EchoArgs;

    #[async_trait]
    impl AsyncExport for EchoArgs {
        async fn run(&self, args: Vec<HostValue>) -> Result<String, BridgeError> {
            Ok(args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(","))
        }
    }

    fn bridge(task: Arc<dyn AsyncExport>) -> PromiseBridge {
        PromiseBridge::new("renderTest", task, Handle::current())
    }

    #[tokio::test]
    async fn test_resolves_with_body_value() {
        let promise = bridge(Arc::new(Fixed(Ok("<p>done</p>")))).call(vec![]);
        assert_eq!(promise.settled().await, Ok("<p>done</p>".to_string()));
    }

    #[tokio::test]
    async fn test_rejects_with_error_text() {
        let promise = bridge(Arc::new(Fixed(Err("bad")))).call(vec![]);
        assert_eq!(promise.settled().await, Err("Panic in fixed: bad".to_string()));
    }

    #[tokio::test]
    async fn test_panic_becomes_rejection() {
        let promise = bridge(Arc::new(Panics)).call(vec![]);
        let reason = promise.settled().await.unwrap_err();
        assert_eq!(reason, "Panic in renderTest: task blew up");
    }

    #[tokio::test]
    async fn test_args_reach_the_body() {
        let promise = bridge(Arc::new(EchoArgs)).call(vec![HostValue::from("a"), HostValue::Number(2.0)]);
        assert_eq!(promise.settled().await, Ok("a,2".to_string()));
    }

    #[tokio::test]
    async fn test_call_returns_before_body_completes() {
        let gate = Arc::new(Notify::new());
        let promise = bridge(Arc::new(Gated(Arc::clone(&gate)))).call(vec![]);

        // call() came back while the body waits on the gate
        gate.notify_one();
        assert_eq!(promise.settled().await, Ok("released".to_string()));
    }

    #[tokio::test]
    async fn test_host_handle_called_exactly_once_on_every_path() {
        let tasks: Vec<Arc<dyn AsyncExport>> = vec![
            Arc::new(Fixed(Ok("ok"))),
            Arc::new(Fixed(Err("err"))),
            Arc::new(Panics),
        ];

        for task in tasks {
            let calls = Arc::new(AtomicUsize::new(0));
            let (done_tx, done_rx) = tokio::sync::oneshot::channel::<PromiseState>();
            let done_tx = Arc::new(Mutex::new(Some(done_tx)));

            let (c1, d1) = (Arc::clone(&calls), Arc::clone(&done_tx));
            let (c2, d2) = (Arc::clone(&calls), Arc::clone(&done_tx));
            let handle = PromiseHandle::new(
                move |_| {
                    c1.fetch_add(1, Ordering::SeqCst);
                    if let Some(tx) = d1.lock().unwrap().take() {
                        let _ = tx.send(PromiseState::Resolved);
                    }
                },
                move |_| {
                    c2.fetch_add(1, Ordering::SeqCst);
                    if let Some(tx) = d2.lock().unwrap().take() {
                        let _ = tx.send(PromiseState::Rejected);
                    }
                },
            );

            bridge(task).call_with(handle, vec![]);
            let state = done_rx.await.unwrap();
            assert_ne!(state, PromiseState::Pending);

            // Give any stray second callback a chance to run
            tokio::task::yield_now().await;
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }
}
