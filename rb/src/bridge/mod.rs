//! Host/guest function bridge
//!
//! - [`ExportRegistry`] - frozen name-to-export table
//! - [`SyncCallAdapter`] - in-line render, always answers with text
//! - [`PromiseBridge`] - detached task, settles a promise exactly once
//! - [`Settlement`] - the `Pending -> Resolved | Rejected` guard

mod error;
mod promise;
mod promise_bridge;
mod registry;
mod sync_adapter;

pub use error::{BridgeError, RegistryError, SettleError};
pub use promise::{HostPromise, PromiseHandle, PromiseState, Settlement};
pub use promise_bridge::{AsyncExport, PromiseBridge};
pub use registry::{CallResult, Export, ExportKind, ExportRegistry, ExportRegistryBuilder};
pub use sync_adapter::{SyncCallAdapter, SyncExport, fallback_html};
