// SPDX-License-Identifier: Apache-2.0

use crate::{CliError, OutputMode};
use hub_contracts_core::{canonical, ErrorCode};
use hub_contracts_ingest::{load, LoadOutcome};
use serde::Serialize;
use std::path::Path;

/// Prints `payload` on stdout: canonical compact JSON in `--json` mode, pretty
/// JSON otherwise.
pub(crate) fn emit_ok<T: Serialize>(output_mode: OutputMode, payload: &T) -> Result<(), CliError> {
    let text = if output_mode.json {
        canonical::stable_json_string(payload)
    } else {
        serde_json::to_string_pretty(payload)
    }
    .map_err(|e| CliError::internal(e.to_string()))?;
    println!("{text}");
    Ok(())
}

/// Loads the dataset through the shared cache and halts on failure or on an
/// empty table; nothing is rendered in either case.
pub(crate) fn load_or_halt(source: &Path) -> Result<hub_contracts_ingest::CachedDataset, CliError> {
    match load(source) {
        LoadOutcome::Loaded(dataset) if dataset.table.is_empty() => Err(CliError::new(
            ErrorCode::DatasetUnavailable,
            "contract dataset has no rows",
        )
        .with_detail("source", &source.display().to_string())),
        LoadOutcome::Loaded(dataset) => Ok(dataset),
        LoadOutcome::NoData { error } => Err(CliError::new(
            ErrorCode::DatasetUnavailable,
            "contract dataset unavailable",
        )
        .with_detail("source", &source.display().to_string())
        .with_detail("kind", error.kind())
        .with_detail("error", &error.to_string())),
    }
}
