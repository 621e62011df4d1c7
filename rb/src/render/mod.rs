//! Template rendering
//!
//! The bridge treats rendering as one collaborator call:
//! `render(component, context) -> text | RenderFault`.

mod context;
mod error;
mod renderer;
pub mod templates;

pub use context::{CancelToken, DEFAULT_MAX_DEPTH, RenderContext};
pub use error::RenderFault;
pub use renderer::{Renderer, TemplateRenderer};
