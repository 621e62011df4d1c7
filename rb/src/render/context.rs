//! Per-call render context

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Default limit on component nesting
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Cloneable cancellation flag shared with a [`RenderContext`]
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Context threaded through one render call
///
/// One instance per call, dropped when the call returns. The renderer
/// checks for cancellation before each component, so a cancelled context
/// turns the remainder of the render into a fault.
#[derive(Debug, Clone)]
pub struct RenderContext {
    cancel: CancelToken,
    max_depth: usize,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            cancel: CancelToken::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Handle that can cancel this context from elsewhere
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}
