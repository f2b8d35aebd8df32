// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use hub_contracts_model::{AugmentedContract, AugmentedTable, Column};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv flush failed: {0}")]
    Flush(String),
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rows ordered by `column`; ties keep table order and missing cells go last
/// in both directions.
#[must_use]
pub fn sort_rows(table: &AugmentedTable, column: Column, ascending: bool) -> Vec<&AugmentedContract> {
    let mut rows: Vec<&AugmentedContract> = table.rows().iter().collect();
    rows.sort_by(|a, b| {
        let (left, right) = (a.cell(column), b.cell(column));
        match (left.is_missing(), right.is_missing()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) if ascending => left.compare(&right),
            (false, false) => right.compare(&left),
        }
    });
    rows
}

/// Encodes the table as delimited text: header row, no index column, every
/// source column plus the derived duration.
pub fn serialize(
    table: &AugmentedTable,
    sort_column: Column,
    ascending: bool,
) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(Column::EXPORT.iter().map(|c| c.header()))?;
    for row in sort_rows(table, sort_column, ascending) {
        writer.write_record(Column::EXPORT.iter().map(|c| row.cell(*c).to_field()))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))
}

pub fn write_export(
    path: &Path,
    table: &AugmentedTable,
    sort_column: Column,
    ascending: bool,
) -> Result<usize, ExportError> {
    let bytes = serialize(table, sort_column, ascending)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, &bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), rows = table.len(), "export written");
    Ok(bytes.len())
}
