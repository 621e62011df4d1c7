//! Bridge error types

use std::any::Any;

use kvstore::KvError;
use thiserror::Error;

use crate::render::RenderFault;

use super::PromiseState;

/// Failures inside an asynchronous export
///
/// The `Display` text of each variant is exactly the rejection reason the
/// host receives.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Failed to get KV value: {0}")]
    KvGet(#[source] KvError),

    #[error("Failed to set KV value: {0}")]
    KvSet(#[source] KvError),

    #[error("Failed to render {what}: {source}")]
    Render { what: &'static str, source: RenderFault },

    #[error("Panic in {export}: {message}")]
    Panic { export: String, message: String },
}

/// A settle attempt on a promise that already left `Pending`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettleError {
    #[error("promise already {0}")]
    AlreadySettled(PromiseState),
}

/// Host-side misuse of the export registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Unknown export: {0}")]
    UnknownExport(String),
}

/// Best-effort text of a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kv_reasons_name_the_operation() {
        let get = BridgeError::KvGet(KvError::Backend("offline".to_string()));
        assert_eq!(get.to_string(), "Failed to get KV value: Store backend error: offline");

        let set = BridgeError::KvSet(KvError::Backend("read-only".to_string()));
        assert!(set.to_string().contains("set"));
        assert!(set.to_string().contains("read-only"));
    }

    #[test]
    fn test_render_and_panic_reasons() {
        let err = BridgeError::Render {
            what: "KV fragment",
            source: RenderFault::new("bad template"),
        };
        assert_eq!(err.to_string(), "Failed to render KV fragment: bad template");

        let err = BridgeError::Panic {
            export: "renderKV".to_string(),
            message: "index out of bounds".to_string(),
        };
        assert_eq!(err.to_string(), "Panic in renderKV: index out of bounds");
    }

    #[test]
    fn test_panic_message_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(&*payload), "static str");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(&*payload), "owned");

        let payload: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(&*payload), "unknown panic payload");
    }

    #[test]
    fn test_settle_error_message() {
        let err = SettleError::AlreadySettled(PromiseState::Resolved);
        assert_eq!(err.to_string(), "promise already resolved");
    }
}
