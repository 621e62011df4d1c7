//! Export registry
//!
//! Maps host-visible call names to bridge functions. Exports are
//! installed on a builder at startup; `build()` freezes the table and it
//! is never written again.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::host::HostValue;

use super::{HostPromise, PromiseBridge, RegistryError, SyncExport};

/// How an export answers the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Sync,
    Async,
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => write!(f, "sync"),
            Self::Async => write!(f, "async"),
        }
    }
}

/// A bridge function bound to a name
#[derive(Clone)]
pub enum Export {
    Sync(Arc<dyn SyncExport>),
    Async(Arc<PromiseBridge>),
}

impl Export {
    pub fn kind(&self) -> ExportKind {
        match self {
            Self::Sync(_) => ExportKind::Sync,
            Self::Async(_) => ExportKind::Async,
        }
    }

    /// Invoke the export; never blocks the caller
    pub fn call(&self, args: Vec<HostValue>) -> CallResult {
        match self {
            Self::Sync(export) => CallResult::Text(export.call(&args)),
            Self::Async(bridge) => CallResult::Promise(bridge.call(args)),
        }
    }
}

/// What the host gets back from one call
#[derive(Debug)]
pub enum CallResult {
    /// Immediate return value of a synchronous export
    Text(String),
    /// Pending promise of an asynchronous export
    Promise(HostPromise),
}

impl CallResult {
    /// Collapse into the final text, waiting on a promise if needed
    pub async fn into_text(self) -> Result<String, String> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Promise(promise) => promise.settled().await,
        }
    }
}

/// Collects exports before the registry is frozen
#[derive(Default)]
pub struct ExportRegistryBuilder {
    exports: HashMap<String, Export>,
}

impl ExportRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `export` to `name`, silently replacing an earlier binding
    pub fn install(&mut self, name: impl Into<String>, export: Export) -> &mut Self {
        let name = name.into();
        if let Some(previous) = self.exports.insert(name.clone(), export) {
            debug!(%name, previous = %previous.kind(), "install: replaced existing export");
        }
        self
    }

    /// Shorthand for installing a synchronous export
    pub fn install_sync(&mut self, name: impl Into<String>, export: impl SyncExport + 'static) -> &mut Self {
        self.install(name, Export::Sync(Arc::new(export)))
    }

    /// Shorthand for installing a promise bridge under its own name
    pub fn install_async(&mut self, bridge: PromiseBridge) -> &mut Self {
        let name = bridge.name().to_string();
        self.install(name, Export::Async(Arc::new(bridge)))
    }

    pub fn build(self) -> ExportRegistry {
        info!(exports = self.exports.len(), "Export registry frozen");
        ExportRegistry {
            exports: self.exports,
        }
    }
}

/// Immutable name-to-export table shared with the host
pub struct ExportRegistry {
    exports: HashMap<String, Export>,
}

impl ExportRegistry {
    pub fn builder() -> ExportRegistryBuilder {
        ExportRegistryBuilder::new()
    }

    /// Call the export registered under `name`
    pub fn call(&self, name: &str, args: Vec<HostValue>) -> Result<CallResult, RegistryError> {
        debug!(%name, args = args.len(), "ExportRegistry::call: called");
        let export = self
            .exports
            .get(name)
            .ok_or_else(|| RegistryError::UnknownExport(name.to_string()))?;
        Ok(export.call(args))
    }

    pub fn get(&self, name: &str) -> Option<&Export> {
        self.exports.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.exports.contains_key(name)
    }

    pub fn kind(&self, name: &str) -> Option<ExportKind> {
        self.exports.get(name).map(Export::kind)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.exports.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{AsyncExport, BridgeError};
    use async_trait::async_trait;
    use tokio::runtime::Handle;

    struct Constant(&'static str);

    impl SyncExport for Constant {
        fn call(&self, _args: &[HostValue]) -> String {
            self.0.to_string()
        }
    }

    struct Later;

    #[async_trait]
    impl AsyncExport for Later {
        async fn run(&self, _args: Vec<HostValue>) -> Result<String, BridgeError> {
            Ok("later".to_string())
        }
    }

    #[test]
    fn test_reinstall_replaces_silently() {
        let mut builder = ExportRegistry::builder();
        builder.install_sync("render", Constant("first"));
        builder.install_sync("render", Constant("second"));
        let registry = builder.build();

        assert_eq!(registry.len(), 1);
        match registry.call("render", vec![]).unwrap() {
            CallResult::Text(text) => assert_eq!(text, "second"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_export() {
        let registry = ExportRegistry::builder().build();
        assert!(registry.is_empty());
        let err = registry.call("renderNothing", vec![]).unwrap_err();
        assert_eq!(err, RegistryError::UnknownExport("renderNothing".to_string()));
    }

    #[tokio::test]
    async fn test_kinds_and_names() {
        let mut builder = ExportRegistry::builder();
        builder
            .install_sync("b", Constant("b"))
            .install_async(PromiseBridge::new("a", Arc::new(Later), Handle::current()));
        let registry = builder.build();

        assert_eq!(registry.names(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(registry.kind("a"), Some(ExportKind::Async));
        assert_eq!(registry.kind("b"), Some(ExportKind::Sync));
        assert_eq!(registry.kind("c"), None);
        assert!(registry.contains("a"));

        let text = registry.call("a", vec![]).unwrap().into_text().await;
        assert_eq!(text, Ok("later".to_string()));
    }
}
