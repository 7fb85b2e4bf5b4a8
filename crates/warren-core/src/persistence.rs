//! Snapshot persistence for the page store

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::model::Snapshot;

/// Data directory: .warren/
pub const DATA_DIR: &str = ".warren";

/// History file holding the serialized snapshot
pub const HISTORY_FILE: &str = "history.json";

/// Get data directory path
pub fn data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

/// Get history file path
pub fn history_path(root: &Path) -> PathBuf {
    root.join(DATA_DIR).join(HISTORY_FILE)
}

/// Ensure data directory exists
pub fn ensure_data_dir(root: &Path) -> std::io::Result<()> {
    let dir = data_dir(root);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(())
}

/// Delete the data directory and the history it holds.
pub fn clear_history(root: &Path) -> std::io::Result<()> {
    let dir = data_dir(root);
    if dir.exists() {
        std::fs::remove_dir_all(&dir)?;
    }
    Ok(())
}

/// Opaque snapshot round-trip storage. The core never prescribes the
/// backing; swapping the backend must not touch tree or layout logic.
pub trait Persistence: Send + Sync {
    fn load(&self) -> anyhow::Result<Snapshot>;
    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()>;
}

/// File-backed persistence: pretty-printed JSON under `.warren/history.json`.
pub struct JsonFile {
    root: PathBuf,
}

impl JsonFile {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonFile { root: root.into() }
    }

    pub fn path(&self) -> PathBuf {
        history_path(&self.root)
    }
}

impl Persistence for JsonFile {
    /// Load the snapshot. A missing file is a fresh session, not an error.
    fn load(&self) -> anyhow::Result<Snapshot> {
        let path = self.path();
        if !path.exists() {
            return Ok(Snapshot::default());
        }
        let json_str = std::fs::read_to_string(&path)?;
        let snapshot: Snapshot = serde_json::from_str(&json_str)?;
        tracing::debug!("history loaded from: {}", path.display());
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        ensure_data_dir(&self.root)?;
        let path = self.path();
        let json_str = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&path, json_str)?;
        tracing::debug!("history saved: {}", path.display());
        Ok(())
    }
}

/// In-memory persistence for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryPersistence {
    inner: Mutex<Snapshot>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self) -> anyhow::Result<Snapshot> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("snapshot lock poisoned"))?;
        Ok(inner.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("snapshot lock poisoned"))?;
        *inner = snapshot.clone();
        Ok(())
    }
}
