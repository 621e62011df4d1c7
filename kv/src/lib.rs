//! KvStore - string key-value store adapter
//!
//! The render bridge only ever talks to its external store through two
//! operations, `get` and `set`. This crate defines that contract as the
//! [`KvStore`] trait and ships two implementations:
//!
//! - [`MemoryKv`] - in-process map, for tests and ephemeral hosts
//! - [`FileKv`] - a single JSON document on disk
//!
//! # Example
//!
//! ```ignore
//! use kvstore::{FileKv, KvStore};
//!
//! let kv = FileKv::open("kv.json")?;
//! kv.set("last_visit", "just now").await?;
//! let previous = kv.get("last_visit").await?;
//! ```

use std::path::PathBuf;

pub mod cli;
pub mod config;
mod error;
mod file;
mod memory;
mod store;

pub use error::KvError;
pub use file::FileKv;
pub use memory::MemoryKv;
pub use store::KvStore;

/// Default location of the store document
pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("renderbridge")
        .join("kv.json")
}
