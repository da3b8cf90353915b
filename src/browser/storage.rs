use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::warn;

use super::ExtensionStorage;
use crate::fsutil::write_atomic;

static TAKE_SEQ: AtomicU64 = AtomicU64::new(0);

/// One JSON file per key under a directory.
#[derive(Clone, Debug)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("create storage dir {}", root.display()))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            anyhow::bail!("invalid storage key {:?}", key);
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

fn parse_entry(bytes: &[u8], key: &str) -> Result<Value> {
    serde_json::from_slice(bytes).with_context(|| format!("parse storage entry {}", key))
}

impl ExtensionStorage for DirStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.entry_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(parse_entry(&bytes, key)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let path = self.entry_path(key)?;
        let bytes = serde_json::to_vec_pretty(&value).context("serialize storage entry")?;
        write_atomic(&path, &bytes).with_context(|| format!("write storage entry {}", key))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("remove {}", path.display())),
        }
    }

    /// Renames the entry to a private name before reading it, so of two
    /// concurrent takers only one can see the value.
    fn take(&self, key: &str) -> Result<Option<Value>> {
        let path = self.entry_path(key)?;
        let claimed = path.with_extension(format!(
            "taking.{}.{}",
            std::process::id(),
            TAKE_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        match fs::rename(&path, &claimed) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("claim {}", path.display()));
            }
        }

        let bytes = fs::read(&claimed).with_context(|| format!("read {}", claimed.display()));
        discard_claimed(&claimed);
        Ok(Some(parse_entry(&bytes?, key)?))
    }
}

/// Removes a claimed entry; a leftover file is logged, not fatal.
fn discard_claimed(claimed: &Path) -> bool {
    match fs::remove_file(claimed) {
        Ok(()) => true,
        Err(err) => {
            warn!(path = %claimed.display(), %err, "could not remove claimed storage entry");
            false
        }
    }
}

/// Process-local storage, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExtensionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn take(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.lock().remove(key))
    }
}

#[cfg(test)]
#[path = "../tests/browser/storage_tests.rs"]
mod tests;
