//! # Selection State Store
//!
//! Remembers the last script run in each project, keyed by absolute project path.
//!
//! The pipeline receives the store as an explicit handle: [`FileStateStore`] in the
//! binary, [`MemoryStateStore`] wherever persistence is unavailable or unwanted.

use crate::models::ProjectState;
use anyhow::{Context, Result};
use std::{fs, io::ErrorKind, io::Write, path::PathBuf};
use tempfile::NamedTempFile;

/// A key-value record of project path → last script name. Last write wins.
pub trait StateStore {
    fn get(&self, project_path: &str) -> Option<String>;
    fn set(&mut self, project_path: &str, script: &str);
    /// Persists pending changes. A no-op when nothing changed.
    fn flush(&mut self) -> Result<()>;
}

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: ProjectState,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, project_path: &str) -> Option<String> {
        self.entries.get(project_path).cloned()
    }

    fn set(&mut self, project_path: &str, script: &str) {
        self.entries
            .insert(project_path.to_string(), script.to_string());
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A JSON-file backed store, read once on open and written on [`StateStore::flush`].
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    entries: ProjectState,
    dirty: bool,
}

impl FileStateStore {
    /// Opens the store at `path`. A missing or corrupt file opens as empty.
    pub fn open(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!(
                    "State file '{}' is corrupt ({}). Starting with an empty record.",
                    path.display(),
                    e
                );
                ProjectState::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => ProjectState::new(),
            Err(e) => {
                log::warn!("State file '{}' is unreadable: {}", path.display(), e);
                ProjectState::new()
            }
        };
        log::debug!("Opened state '{}' with {} entries.", path.display(), entries.len());

        Self {
            path,
            entries,
            dirty: false,
        }
    }

    /// Checks if there are changes that have not been written yet.
    pub fn needs_saving(&self) -> bool {
        self.dirty
    }
}

impl StateStore for FileStateStore {
    fn get(&self, project_path: &str) -> Option<String> {
        self.entries.get(project_path).cloned()
    }

    fn set(&mut self, project_path: &str, script: &str) {
        let previous = self
            .entries
            .insert(project_path.to_string(), script.to_string());
        if previous.as_deref() != Some(script) {
            self.dirty = true;
        }
    }

    fn flush(&mut self) -> Result<()> {
        if !self.needs_saving() {
            return Ok(());
        }

        let dir = self
            .path
            .parent()
            .with_context(|| format!("State path '{}' has no parent directory", self.path.display()))?;
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory '{}'", dir.display()))?;

        let json = serde_json::to_string_pretty(&self.entries)?;

        // Write next to the target and rename, so a crash never leaves half a file.
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create a temporary file in '{}'", dir.display()))?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to write state file '{}'", self.path.display()))?;

        self.dirty = false;
        Ok(())
    }
}
