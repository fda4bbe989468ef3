use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt cache data: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A single fixed storage slot holding the serialized exam cache.
///
/// Implementations are synchronous and assume one writer. Two processes
/// sharing a slot race silently; the last `set` wins.
pub trait CacheStore {
    fn get(&self) -> Result<Option<String>, PersistenceError>;
    fn set(&self, value: &str) -> Result<(), PersistenceError>;
    fn clear(&self) -> Result<(), PersistenceError>;
}

/// File-backed slot. Writes land in a sibling temp file and are renamed
/// over the slot, so a crash mid-write keeps the previous aggregate.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CacheStore for FileStore {
    fn get(&self) -> Result<Option<String>, PersistenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, value: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
struct MemorySlot {
    value: Option<String>,
    failing: bool,
}

/// In-memory slot for tests. Clones share the same slot.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemorySlot>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail, as a disabled or full storage would.
    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut slot) = self.inner.lock() {
            slot.failing = failing;
        }
    }

    fn with_slot<T>(
        &self,
        f: impl FnOnce(&mut MemorySlot) -> T,
    ) -> Result<T, PersistenceError> {
        let mut slot = self
            .inner
            .lock()
            .map_err(|_| PersistenceError::Unavailable("memory slot poisoned".to_string()))?;
        if slot.failing {
            return Err(PersistenceError::Unavailable(
                "storage disabled".to_string(),
            ));
        }
        Ok(f(&mut slot))
    }
}

#[cfg(test)]
impl CacheStore for MemoryStore {
    fn get(&self) -> Result<Option<String>, PersistenceError> {
        self.with_slot(|slot| slot.value.clone())
    }

    fn set(&self, value: &str) -> Result<(), PersistenceError> {
        self.with_slot(|slot| slot.value = Some(value.to_string()))
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        self.with_slot(|slot| slot.value = None)
    }
}
