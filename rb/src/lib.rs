//! RenderBridge - host/guest function bridge for HTML rendering
//!
//! A guest module exposes a small set of named render functions to its
//! host. Some answer synchronously with HTML text; `renderKV` answers
//! with a promise that a detached task settles after a round-trip to an
//! external key-value store.
//!
//! # Core Guarantees
//!
//! - **Sync exports always answer**: render faults and panics become inline markup
//! - **Promises settle exactly once**: success, store failure or panic
//! - **Frozen registry**: exports are installed at startup and never change
//! - **Injected time**: content derived from "now" comes from a [`Clock`]
//!
//! # Modules
//!
//! - [`bridge`] - registry, sync adapter, promise bridge
//! - [`render`] - Handlebars template renderer
//! - [`exports`] - the four standard exports
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface of the `rb` host

pub mod bridge;
pub mod cli;
pub mod clock;
pub mod component;
pub mod config;
pub mod exports;
pub mod host;
pub mod render;

// Re-export commonly used types
pub use bridge::{
    AsyncExport, BridgeError, CallResult, Export, ExportKind, ExportRegistry, HostPromise, PromiseBridge,
    PromiseHandle, PromiseState, RegistryError, SyncCallAdapter, SyncExport,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use component::{Component, Param};
pub use config::Config;
pub use exports::{ExportDeps, ExportSettings, standard_registry};
pub use host::HostValue;
pub use render::{RenderContext, RenderFault, Renderer, TemplateRenderer};
