//! KvStore trait definition

use async_trait::async_trait;

use crate::KvError;

/// A string-to-string store reachable only through `get` and `set`
///
/// Both operations may block and may fail independently. `get` on a key
/// that was never written returns an empty string: there is no separate
/// "not found" signal, so a stored empty value and a missing key look the
/// same to callers.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key` (empty string when absent)
    async fn get(&self, key: &str) -> Result<String, KvError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), KvError>;

    /// List stored keys in sorted order
    async fn keys(&self) -> Result<Vec<String>, KvError>;
}
