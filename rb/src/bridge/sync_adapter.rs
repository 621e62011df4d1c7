//! Synchronous call adapter
//!
//! Builds a component from host arguments, renders it in-line and always
//! answers with text. Never suspends, never spawns, never panics past the
//! boundary.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::component::Component;
use crate::host::HostValue;
use crate::render::{DEFAULT_MAX_DEPTH, RenderContext, Renderer};

use super::error::panic_message;

/// An export that answers immediately with HTML text
pub trait SyncExport: Send + Sync {
    fn call(&self, args: &[HostValue]) -> String;
}

/// Inline markup returned in place of a failed render
///
/// Always a single line. The message is embedded as-is so the host sees
/// the fault text verbatim.
pub fn fallback_html(message: &str) -> String {
    let flat = message.replace(['\r', '\n'], " ");
    format!("<div>Error rendering component: {}</div>", flat)
}

/// Adapts a component builder plus a renderer into a [`SyncExport`]
pub struct SyncCallAdapter<F> {
    name: String,
    build: F,
    renderer: Arc<dyn Renderer>,
    max_depth: usize,
}

impl<F> SyncCallAdapter<F>
where
    F: Fn(&[HostValue]) -> Component + Send + Sync,
{
    pub fn new(name: impl Into<String>, renderer: Arc<dyn Renderer>, build: F) -> Self {
        Self {
            name: name.into(),
            build,
            renderer,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl<F> SyncExport for SyncCallAdapter<F>
where
    F: Fn(&[HostValue]) -> Component + Send + Sync,
{
    fn call(&self, args: &[HostValue]) -> String {
        debug!(export = %self.name, args = args.len(), "SyncCallAdapter::call: called");
        let ctx = RenderContext::new().with_max_depth(self.max_depth);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let component = (self.build)(args);
            self.renderer.render(&component, &ctx)
        }));

        match outcome {
            Ok(Ok(html)) => html,
            Ok(Err(fault)) => {
                warn!(export = %self.name, %fault, "Render fault, returning fallback markup");
                fallback_html(fault.message())
            }
            Err(payload) => {
                let message = panic_message(&*payload);
                warn!(export = %self.name, %message, "Panic during render, returning fallback markup");
                fallback_html(&message)
            }
        }
    }
}
