//! Durable client storage: a tiny string key/value store standing in for the
//! browser's local storage. Only `bestStreak` is ever written.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

pub const BEST_STREAK_KEY: &str = "bestStreak";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

pub trait ClientStorage {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
  pub values: HashMap<String, String>,
}

impl ClientStorage for MemoryStorage {
  fn get(&self, key: &str) -> Option<String> {
    self.values.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    self.values.insert(key.to_string(), value.to_string());
    Ok(())
  }
}

/// JSON object on disk, replaced on every `set` through a sibling temp file
/// so an interrupted write never truncates the previous contents.
#[derive(Clone, Debug)]
pub struct FileStorage {
  path: PathBuf,
  values: HashMap<String, String>,
}

impl FileStorage {
  /// Open the store at `path`. A missing or unreadable file starts empty.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let values = match std::fs::read_to_string(&path) {
      Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
        warn!(target: "verbos_backend", path = %path.display(), error = %e, "Ignoring corrupt client storage file");
        HashMap::new()
      }),
      Err(_) => HashMap::new(),
    };
    info!(target: "verbos_backend", path = %path.display(), keys = values.len(), "Client storage opened");
    Self { path, values }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl ClientStorage for FileStorage {
  fn get(&self, key: &str) -> Option<String> {
    self.values.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    self.values.insert(key.to_string(), value.to_string());
    if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
      std::fs::create_dir_all(dir)?;
    }
    let tmp = self.tmp_path();
    std::fs::write(&tmp, serde_json::to_string_pretty(&self.values)?)?;
    std::fs::rename(&tmp, &self.path)?;
    Ok(())
  }
}

impl FileStorage {
  fn tmp_path(&self) -> PathBuf {
    let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    self.path.with_file_name(name)
  }
}

/// Stored best streak; anything unparsable reads as no value.
pub fn read_best_streak(storage: &impl ClientStorage) -> Option<u32> {
  storage.get(BEST_STREAK_KEY)?.trim().parse().ok()
}
