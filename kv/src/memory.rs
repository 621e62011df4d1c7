//! In-process KV store

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{KvError, KvStore};

/// KV store held entirely in memory
///
/// Used by the host CLI when no store file is configured and by tests.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryKv {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<String, KvError> {
        debug!(%key, "MemoryKv::get: called");
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned().unwrap_or_default())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        debug!(%key, "MemoryKv::set: called");
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, KvError> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}
