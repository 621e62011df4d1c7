//! Render fault type

use thiserror::Error;

/// A rendering failure
///
/// Carries only message text. The bridge never lets one of these escape:
/// synchronous exports turn it into inline markup, the promise bridge
/// turns it into a rejection reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RenderFault {
    message: String,
}

impl RenderFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn template_not_found(name: &str) -> Self {
        Self::new(format!("template not found: {}", name))
    }

    pub fn cancelled() -> Self {
        Self::new("render cancelled")
    }

    pub fn too_deep(limit: usize) -> Self {
        Self::new(format!("component nesting exceeds depth {}", limit))
    }
}

impl From<handlebars::RenderError> for RenderFault {
    fn from(err: handlebars::RenderError) -> Self {
        Self::new(err.to_string())
    }
}
