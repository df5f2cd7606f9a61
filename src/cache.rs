//! Snapshot cache for loaded cohorts.
//!
//! A snapshot is valid only for the modification time it was loaded at, so
//! callers always see the current file contents. Each path has its own slot
//! lock held across the load: concurrent misses for one file version wait
//! for a single load instead of racing. Snapshots are shared immutably.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use tracing::{debug, info};

use crate::analyzers::types::StudentRecord;
use crate::error::{DataSourceError, ResultError};
use crate::source::unreadable;
use crate::subjects::SubjectConfig;

struct Snapshot {
    modified: SystemTime,
    records: Arc<Vec<StudentRecord>>,
}

type Slot = Arc<Mutex<Option<Snapshot>>>;

/// Caches loaded cohorts per source path, invalidated by modification time.
pub struct ResultCache {
    subjects: SubjectConfig,
    slots: Mutex<HashMap<PathBuf, Slot>>,
    loads: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ResultCache {
    pub fn new(subjects: SubjectConfig) -> Self {
        Self {
            subjects,
            slots: Mutex::new(HashMap::new()),
            loads: AtomicUsize::new(0),
        }
    }

    /// Number of loads performed from disk so far.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Returns the cohort at `path`, reloading it when the file changed since
    /// the cached snapshot. Failed loads are not cached.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Vec<StudentRecord>>, ResultError> {
        if !path.exists() {
            return Err(DataSourceError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let key = path.canonicalize().map_err(|e| unreadable(path, e))?;

        let slot = {
            let mut slots = lock(&self.slots);
            Arc::clone(slots.entry(key.clone()).or_default())
        };
        let mut cached = lock(&slot);

        let modified = std::fs::metadata(&key)
            .and_then(|m| m.modified())
            .map_err(|e| unreadable(&key, e))?;

        if let Some(snapshot) = cached.as_ref() {
            if snapshot.modified == modified {
                debug!(path = %key.display(), "Result cache hit");
                return Ok(Arc::clone(&snapshot.records));
            }
        }

        let records = Arc::new(self.load(&key)?);
        *cached = Some(Snapshot {
            modified,
            records: Arc::clone(&records),
        });

        Ok(records)
    }

    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    fn load(&self, path: &Path) -> Result<Vec<StudentRecord>, ResultError> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        let records = crate::load(path, &self.subjects)?;
        info!(students = records.len(), "Result cache refreshed");
        Ok(records)
    }
}
