//! Table Cache
//!
//! Memoizes loaded tables keyed by file path. Each entry remembers the file's
//! modification time at load; a later request that observes a different
//! modification time reloads the file.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;

use super::error::{DataError, DataResult};
use super::loader::load_table;
use super::types::Table;

struct CacheEntry {
    modified: Option<SystemTime>,
    table: Arc<Table>,
}

/// Path-keyed cache of loaded tables
#[derive(Default)]
pub struct DataCache {
    entries: RwLock<HashMap<PathBuf, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    reloads: AtomicU64,
}

/// Cache counters
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub reloads: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_load: Option<DateTime<Utc>>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, loading it if absent or stale.
    ///
    /// A file that has disappeared evicts its entry and reports `NotFound`.
    pub fn get_or_load(&self, path: &Path) -> DataResult<Arc<Table>> {
        let modified = match file_modified(path) {
            Ok(m) => m,
            Err(e) => {
                self.invalidate(path);
                return Err(e);
            }
        };

        let stale = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(path) {
                Some(entry) if entry.modified == modified => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(Arc::clone(&entry.table));
                }
                Some(_) => true,
                None => false,
            }
        };

        let table = Arc::new(load_table(path)?);

        if stale {
            self.reloads.fetch_add(1, Ordering::Relaxed);
            tracing::info!(path = %path.display(), "Dataset changed on disk, reloaded");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                table: Arc::clone(&table),
            },
        );

        Ok(table)
    }

    /// Drop the entry for `path`. Returns whether one existed.
    pub fn invalidate(&self, path: &Path) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let removed = entries.remove(path).is_some();
        if removed {
            tracing::debug!(path = %path.display(), "Cache entry invalidated");
        }
        removed
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        CacheStats {
            entries: entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            reloads: self.reloads.load(Ordering::Relaxed),
            oldest_load: entries.values().map(|e| e.table.loaded_at).min(),
        }
    }
}

fn file_modified(path: &Path) -> DataResult<Option<SystemTime>> {
    let metadata = std::fs::metadata(path).map_err(|e| DataError::from_io(path, e))?;
    // Platforms without mtime support cache until invalidated
    Ok(metadata.modified().ok())
}
