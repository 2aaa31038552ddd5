//! Local notepad: free-text drafts that never leave this machine.
//!
//! The pad is a flat JSON object of key to text, rewritten in full on every
//! change.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Keys the dashboard pages write to.
pub const WELL_KNOWN_KEYS: &[&str] = &[
    "statement",
    "dreams",
    "goals",
    "platforms",
    "epk",
    "mentions",
    "brand",
    "brand_checklist",
    "brainstorm",
];

#[derive(Debug, Error)]
pub enum NotepadError {
    #[error("notepad {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("notepad {path} is not a JSON object of strings: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("notepad key must not be blank")]
    BlankKey,
}

pub type NotepadResult<T> = std::result::Result<T, NotepadError>;

/// Key/value text storage backed by one JSON file.
#[derive(Debug, Clone)]
pub struct Notepad {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl Notepad {
    /// Reads the pad at `path`. A missing file is an empty pad.
    pub fn load(path: impl Into<PathBuf>) -> NotepadResult<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| NotepadError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(NotepadError::Io { path, source }),
        };
        log::debug!("notepad: loaded {} entries from {}", entries.len(), path.display());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Stores `text` under `key` and writes the pad to disk.
    pub fn set(&mut self, key: &str, text: impl Into<String>) -> NotepadResult<()> {
        if key.trim().is_empty() {
            return Err(NotepadError::BlankKey);
        }
        self.entries.insert(key.to_string(), text.into());
        self.flush()
    }

    /// Drops `key`. Returns whether it was present; the file is only
    /// rewritten when something changed.
    pub fn remove(&mut self, key: &str) -> NotepadResult<bool> {
        if self.entries.remove(key).is_none() {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    fn flush(&self) -> NotepadResult<()> {
        let io_err = |source| NotepadError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            NotepadError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}
