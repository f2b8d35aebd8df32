// SPDX-License-Identifier: Apache-2.0

use crate::helpers::{emit_ok, load_or_halt};
use crate::{CliError, OutputMode};
use hub_contracts_core::{resolve_log_filter, resolve_source_path, ErrorCode, ResultExt};
use hub_contracts_ingest::{write_export, CachedDataset};
use hub_contracts_model::{Column, FilterSelection, ViewName};
use hub_contracts_query::{apply, augment, filter_options, run, view};
use serde_json::json;
use std::path::{Path, PathBuf};

pub(crate) struct ExportArgs {
    pub(crate) out: PathBuf,
    pub(crate) sort_column: String,
    pub(crate) descending: bool,
    pub(crate) selection: FilterSelection,
}

fn source_summary(source: &Path, dataset: &CachedDataset) -> serde_json::Value {
    json!({
        "path": source,
        "rows": dataset.report.row_count,
        "sha256": dataset.report.source_sha256,
    })
}

pub(crate) fn dashboard(
    source: Option<&Path>,
    selection: &FilterSelection,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let source = resolve_source_path(source);
    let dataset = load_or_halt(&source)?;
    let snapshot = run(&dataset.table, selection);
    for note in &snapshot.notes {
        tracing::info!(note = %note, "dashboard note");
    }
    emit_ok(
        output_mode,
        &json!({
            "command": "dashboard",
            "source": source_summary(&source, &dataset),
            "dashboard": snapshot,
        }),
    )
}

pub(crate) fn single_view(
    source: Option<&Path>,
    name: &str,
    selection: &FilterSelection,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let view_name: ViewName = name.parse().map_err(|e: hub_contracts_model::ModelError| {
        CliError::new(ErrorCode::InvalidArgument, &e.to_string()).with_detail("view", name)
    })?;
    let source = resolve_source_path(source);
    let dataset = load_or_halt(&source)?;
    let summary = view(&dataset.table, selection, view_name);
    emit_ok(
        output_mode,
        &json!({
            "command": "view",
            "source": source_summary(&source, &dataset),
            "shares": summary.shares(),
            "view": summary,
        }),
    )
}

pub(crate) fn options(source: Option<&Path>, output_mode: OutputMode) -> Result<(), CliError> {
    let source = resolve_source_path(source);
    let dataset = load_or_halt(&source)?;
    emit_ok(
        output_mode,
        &json!({
            "command": "options",
            "source": source_summary(&source, &dataset),
            "options": filter_options(&dataset.table),
        }),
    )
}

pub(crate) fn export(
    source: Option<&Path>,
    args: ExportArgs,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let sort_column: Column = args.sort_column.parse().map_err(
        |e: hub_contracts_model::ModelError| {
            CliError::new(ErrorCode::InvalidArgument, &e.to_string())
                .with_detail("sort_column", &args.sort_column)
        },
    )?;
    let source = resolve_source_path(source);
    let dataset = load_or_halt(&source)?;
    let augmented = augment(&apply(&dataset.table, &args.selection));
    let bytes = write_export(&args.out, &augmented, sort_column, !args.descending)
        .with_context("export")
        .map_err(|e| {
            CliError::new(ErrorCode::ExportFailed, &e.to_string())
                .with_detail("out", &args.out.display().to_string())
        })?;
    emit_ok(
        output_mode,
        &json!({
            "command": "export",
            "status": "ok",
            "out": args.out,
            "rows": augmented.len(),
            "bytes": bytes,
            "sort_column": sort_column.header(),
            "descending": args.descending,
        }),
    )
}

pub(crate) fn views(output_mode: OutputMode) -> Result<(), CliError> {
    let catalog: Vec<serde_json::Value> = ViewName::ALL
        .into_iter()
        .map(|v| {
            json!({
                "name": v.as_str(),
                "key": v.key_label(),
                "metric": v.metric_label(),
                "limit": v.limit(),
            })
        })
        .collect();
    emit_ok(output_mode, &json!({ "command": "views", "views": catalog }))
}

pub(crate) fn config(source: Option<&Path>, output_mode: OutputMode) -> Result<(), CliError> {
    emit_ok(
        output_mode,
        &json!({
            "command": "config",
            "source": resolve_source_path(source),
            "log_filter": resolve_log_filter(),
            "log_json": hub_contracts_core::log_json_enabled(),
        }),
    )
}
