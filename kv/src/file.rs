//! File-backed KV store
//!
//! The whole store is one JSON object on disk. Every `get` reads the file
//! and every `set` rewrites it through a temp file + rename, so a reader
//! never sees a half-written document. Writers sharing a `FileKv` (or any
//! clone of it) take turns, so concurrent sets of different keys all land.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{KvError, KvStore};

type Document = BTreeMap<String, String>;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// KV store persisted as a JSON document
#[derive(Debug, Clone)]
pub struct FileKv {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileKv {
    /// Open a store at `path`, creating the parent directory if needed
    ///
    /// The file itself is created lazily on the first `set`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KvError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        info!(path = %path.display(), "Opened file KV store");
        Ok(Self {
            path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, KvError>
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> Result<T, KvError> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || f(&path))
            .await
            .map_err(|e| KvError::Backend(format!("store worker failed: {}", e)))?
    }
}

fn read_document(path: &Path) -> Result<Document, KvError> {
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(Document::new()),
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::new()),
        Err(e) => Err(e.into()),
    }
}

fn write_document(path: &Path, doc: &Document) -> Result<(), KvError> {
    let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp = path.with_extension(format!("tmp.{}.{}", std::process::id(), n));
    let content = serde_json::to_string_pretty(doc)?;
    fs::write(&tmp, content)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

#[async_trait]
impl KvStore for FileKv {
    async fn get(&self, key: &str) -> Result<String, KvError> {
        debug!(%key, "FileKv::get: called");
        let key = key.to_string();
        self.blocking(move |path| {
            let doc = read_document(path)?;
            Ok(doc.get(&key).cloned().unwrap_or_default())
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        debug!(%key, "FileKv::set: called");
        let key = key.to_string();
        let value = value.to_string();
        // read-modify-write of the whole document
        let _guard = self.write_lock.lock().await;
        self.blocking(move |path| {
            let mut doc = read_document(path)?;
            doc.insert(key, value);
            write_document(path, &doc)
        })
        .await
    }

    async fn keys(&self) -> Result<Vec<String>, KvError> {
        self.blocking(|path| Ok(read_document(path)?.into_keys().collect()))
            .await
    }
}
