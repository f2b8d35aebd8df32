// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod cache;
mod cells;
mod decode;
mod hashing;
mod logging;
mod write;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use hub_contracts_model::ContractTable;

pub const CRATE_NAME: &str = "hub-contracts-ingest";

pub use cache::{CachedDataset, DatasetCache};
pub use decode::decode_contracts;
pub use hashing::{hash_bytes, hash_file};
pub use logging::{LoadEvent, LoadLog, LoadStage};
pub use write::{serialize, sort_rows, write_export, ExportError};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("source unavailable: {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}", describe_parse_failure(*line, column.as_deref(), reason))]
    ParseFailure {
        line: u64,
        column: Option<String>,
        reason: String,
    },
}

fn describe_parse_failure(line: u64, column: Option<&str>, reason: &str) -> String {
    match column {
        Some(column) => format!("parse failure at line {line}, column {column}: {reason}"),
        None => format!("parse failure at line {line}: {reason}"),
    }
}

impl LoadError {
    pub(crate) fn parse(line: u64, column: Option<&str>, reason: impl Into<String>) -> Self {
        Self::ParseFailure {
            line,
            column: column.map(ToString::to_string),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => "source_unavailable",
            Self::ParseFailure { .. } => "parse_failure",
        }
    }
}

/// What a load observed about its source.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LoadReport {
    pub source: PathBuf,
    pub source_sha256: String,
    pub row_count: usize,
    pub events: Vec<LoadEvent>,
}

/// Fail-soft result of a load.
///
/// `NoData` stands in for every read or parse failure; its table is empty and
/// callers are expected to stop before rendering anything.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(CachedDataset),
    NoData { error: LoadError },
}

impl LoadOutcome {
    #[must_use]
    pub fn table(&self) -> Arc<ContractTable> {
        match self {
            Self::Loaded(dataset) => Arc::clone(&dataset.table),
            Self::NoData { .. } => Arc::new(ContractTable::empty()),
        }
    }

    /// True for failed loads and for sources without any contract row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Loaded(dataset) => dataset.table.is_empty(),
            Self::NoData { .. } => true,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Loaded(_) => None,
            Self::NoData { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<CachedDataset, LoadError> {
        match self {
            Self::Loaded(dataset) => Ok(dataset),
            Self::NoData { error } => Err(error),
        }
    }
}

static SHARED_CACHE: OnceLock<DatasetCache> = OnceLock::new();

/// Cache shared by every [`load`] call in this process.
pub fn shared_cache() -> &'static DatasetCache {
    SHARED_CACHE.get_or_init(DatasetCache::new)
}

/// Loads `source_path` through the process-wide cache.
pub fn load(source_path: &Path) -> LoadOutcome {
    shared_cache().load(source_path)
}

/// Strict, uncached read of a contract file.
pub fn read_contracts(source_path: &Path) -> Result<ContractTable, LoadError> {
    read_contracts_with_report(source_path).map(|(table, _)| table)
}

pub fn read_contracts_with_report(
    source_path: &Path,
) -> Result<(ContractTable, LoadReport), LoadError> {
    let mut log = LoadLog::default();
    log.emit(
        LoadStage::Read,
        "load.read.begin",
        BTreeMap::from([("source".to_string(), source_path.display().to_string())]),
    );
    let bytes = std::fs::read(source_path).map_err(|source| LoadError::SourceUnavailable {
        path: source_path.to_path_buf(),
        source,
    })?;
    let source_sha256 = hash_bytes(&bytes);
    log.emit(
        LoadStage::Read,
        "load.read.complete",
        BTreeMap::from([
            ("bytes".to_string(), bytes.len().to_string()),
            ("sha256".to_string(), source_sha256.clone()),
        ]),
    );

    log.emit(LoadStage::Parse, "load.parse.begin", BTreeMap::new());
    let table = decode_contracts(bytes.as_slice())?;
    log.emit(
        LoadStage::Validate,
        "load.validate.complete",
        BTreeMap::from([("rows".to_string(), table.len().to_string())]),
    );

    let report = LoadReport {
        source: source_path.to_path_buf(),
        source_sha256,
        row_count: table.len(),
        events: log.events().to_vec(),
    };
    Ok((table, report))
}
