// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use hub_contracts_core::canonical::stable_json_hash_hex;
use hub_contracts_model::{
    ContractTable, FilterSelection, HeadlineMetrics, SummaryTable, ViewName,
};
use serde::{Deserialize, Serialize};

use crate::derived::augment;
use crate::filters::apply;
use crate::views::{compute_all, compute_view, headline_metrics};

/// Informational remark attached to a snapshot; never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineNote {
    EmptyFilterResult,
    NoData { view: ViewName },
    NegativeDuration { contract_ids: Vec<String> },
}

impl Display for PipelineNote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFilterResult => f.write_str("no contract matches the current filters"),
            Self::NoData { view } => write!(f, "{view}: no data"),
            Self::NegativeDuration { contract_ids } => write!(
                f,
                "termination precedes signature for {}",
                contract_ids.join(", ")
            ),
        }
    }
}

/// One full pass of the dashboard for a filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardSnapshot {
    pub selection: FilterSelection,
    pub base_rows: usize,
    pub filtered_rows: usize,
    pub headline: HeadlineMetrics,
    pub views: Vec<SummaryTable>,
    pub notes: Vec<PipelineNote>,
}

impl DashboardSnapshot {
    #[must_use]
    pub fn view(&self, name: ViewName) -> Option<&SummaryTable> {
        self.views.iter().find(|v| v.view == name)
    }

    /// SHA-256 of the canonical JSON form.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        stable_json_hash_hex(self)
    }
}

/// Filter, augment, then compute every view and the headline metrics.
#[must_use]
pub fn run(base: &ContractTable, selection: &FilterSelection) -> DashboardSnapshot {
    let filtered = apply(base, selection);
    let augmented = augment(&filtered);
    let views = compute_all(&augmented);
    let headline = headline_metrics(&augmented);

    let mut notes = Vec::new();
    if augmented.is_empty() {
        notes.push(PipelineNote::EmptyFilterResult);
    }
    notes.extend(
        views
            .iter()
            .filter(|v| v.is_empty() || v.rows.iter().all(|r| r.metric.is_no_data()))
            .map(|v| PipelineNote::NoData { view: v.view }),
    );
    let negative: Vec<String> = augmented
        .negative_durations()
        .into_iter()
        .map(|id| id.as_str().to_string())
        .collect();
    if !negative.is_empty() {
        tracing::warn!(
            contracts = negative.len(),
            ids = %negative.join(","),
            "termination date precedes signature date"
        );
        notes.push(PipelineNote::NegativeDuration {
            contract_ids: negative,
        });
    }

    tracing::info!(
        base_rows = base.len(),
        filtered_rows = augmented.len(),
        notes = notes.len(),
        "dashboard pipeline complete"
    );
    DashboardSnapshot {
        selection: selection.clone(),
        base_rows: base.len(),
        filtered_rows: augmented.len(),
        headline,
        views,
        notes,
    }
}

/// Single view for a filter selection.
#[must_use]
pub fn view(base: &ContractTable, selection: &FilterSelection, name: ViewName) -> SummaryTable {
    compute_view(name, &augment(&apply(base, selection)))
}
