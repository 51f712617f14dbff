//! Durable storage slots for the guest cart.
//!
//! The guest store never talks to a backing medium directly; it goes
//! through this trait so tests and embedders can swap the slot without
//! a real filesystem.

use std::{
    fs, io,
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

/// A single named slot of durable string storage.
pub trait CartStorage: Send + Sync {
    /// Current slot contents, `None` when nothing was ever stored.
    fn read(&self) -> io::Result<Option<String>>;

    /// Replace the slot contents.
    fn write(&self, payload: &str) -> io::Result<()>;

    /// Delete the slot.
    fn clear(&self) -> io::Result<()>;
}

/// Slot backed by a single JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for FileStorage {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    fn write(&self, payload: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, payload)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error),
        }
    }
}

/// In-memory slot for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the slot, e.g. with corrupt payloads.
    #[must_use]
    pub fn with_payload(payload: &str) -> Self {
        Self {
            slot: Mutex::new(Some(payload.to_string())),
        }
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self) -> io::Result<Option<String>> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        Ok(slot.clone())
    }

    fn write(&self, payload: &str) -> io::Result<()> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        *slot = Some(payload.to_string());

        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        *slot = None;

        Ok(())
    }
}
