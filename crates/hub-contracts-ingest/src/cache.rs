// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use hub_contracts_model::ContractTable;

use crate::{read_contracts_with_report, LoadError, LoadEvent, LoadOutcome, LoadReport, LoadStage};

/// One successfully loaded source.
#[derive(Debug, Clone)]
pub struct CachedDataset {
    pub table: Arc<ContractTable>,
    pub report: LoadReport,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<PathBuf, CachedDataset>,
    source_reads: u64,
}

/// Memoizes loaded tables per source path.
///
/// Only successful loads are kept, so a fixed source file is picked up by the
/// next call. The lock is held for the whole load: concurrent callers for the
/// same path wait and then share the single read.
#[derive(Debug, Default)]
pub struct DatasetCache {
    inner: Mutex<CacheState>,
}

fn cache_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

impl DatasetCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail-soft load: every failure becomes [`LoadOutcome::NoData`].
    pub fn load(&self, source_path: &Path) -> LoadOutcome {
        match self.try_load(source_path) {
            Ok(dataset) => LoadOutcome::Loaded(dataset),
            Err(error) => {
                tracing::error!(
                    source = %source_path.display(),
                    kind = error.kind(),
                    error = %error,
                    "contract dataset unavailable"
                );
                LoadOutcome::NoData { error }
            }
        }
    }

    pub fn try_load(&self, source_path: &Path) -> Result<CachedDataset, LoadError> {
        let key = cache_key(source_path);
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = state.entries.get(&key) {
            tracing::debug!(source = %key.display(), "dataset cache hit");
            return Ok(hit.clone());
        }

        tracing::debug!(source = %key.display(), "dataset cache miss");
        state.source_reads += 1;
        let (table, mut report) = read_contracts_with_report(source_path)?;
        report.events.push(LoadEvent {
            stage: LoadStage::Cache,
            name: "load.cache.store".to_string(),
            fields: BTreeMap::from([("key".to_string(), key.display().to_string())]),
        });
        tracing::info!(
            source = %key.display(),
            rows = report.row_count,
            sha256 = %report.source_sha256,
            "contract dataset loaded"
        );
        let dataset = CachedDataset {
            table: Arc::new(table),
            report,
        };
        state.entries.insert(key, dataset.clone());
        Ok(dataset)
    }

    #[must_use]
    pub fn contains(&self, source_path: &Path) -> bool {
        let key = cache_key(source_path);
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .contains_key(&key)
    }

    /// Drops every cached table; the next load re-reads its source.
    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .clear();
    }

    /// Number of times a source file has actually been read.
    #[must_use]
    pub fn source_reads(&self) -> u64 {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .source_reads
    }
}
