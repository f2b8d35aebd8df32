// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Catalog of aggregation views, in dashboard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewName {
    ValueByProject,
    ValueByContractType,
    TopSuppliersByValue,
    ContractsByStatus,
    EsgBySupplier,
    TopSuppliersByCompliance,
    ClauseCoverage,
    ContractsByRiskLevel,
    PendingItemsByProject,
    TopDelays,
    ProblemContractsByProject,
    SignaturesByMonth,
    CriticalByProject,
    CriticalValueBySupplier,
    MeanDurationByContractType,
}

impl ViewName {
    pub const ALL: [ViewName; 15] = [
        ViewName::ValueByProject,
        ViewName::ValueByContractType,
        ViewName::TopSuppliersByValue,
        ViewName::ContractsByStatus,
        ViewName::EsgBySupplier,
        ViewName::TopSuppliersByCompliance,
        ViewName::ClauseCoverage,
        ViewName::ContractsByRiskLevel,
        ViewName::PendingItemsByProject,
        ViewName::TopDelays,
        ViewName::ProblemContractsByProject,
        ViewName::SignaturesByMonth,
        ViewName::CriticalByProject,
        ViewName::CriticalValueBySupplier,
        ViewName::MeanDurationByContractType,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValueByProject => "value_by_project",
            Self::ValueByContractType => "value_by_contract_type",
            Self::TopSuppliersByValue => "top_suppliers_by_value",
            Self::ContractsByStatus => "contracts_by_status",
            Self::EsgBySupplier => "esg_by_supplier",
            Self::TopSuppliersByCompliance => "top_suppliers_by_compliance",
            Self::ClauseCoverage => "clause_coverage",
            Self::ContractsByRiskLevel => "contracts_by_risk_level",
            Self::PendingItemsByProject => "pending_items_by_project",
            Self::TopDelays => "top_delays",
            Self::ProblemContractsByProject => "problem_contracts_by_project",
            Self::SignaturesByMonth => "signatures_by_month",
            Self::CriticalByProject => "critical_by_project",
            Self::CriticalValueBySupplier => "critical_value_by_supplier",
            Self::MeanDurationByContractType => "mean_duration_by_contract_type",
        }
    }

    #[must_use]
    pub const fn key_label(self) -> &'static str {
        match self {
            Self::ValueByProject
            | Self::PendingItemsByProject
            | Self::ProblemContractsByProject
            | Self::CriticalByProject => "project",
            Self::ValueByContractType | Self::MeanDurationByContractType => "contract_type",
            Self::TopSuppliersByValue
            | Self::EsgBySupplier
            | Self::TopSuppliersByCompliance
            | Self::CriticalValueBySupplier => "supplier",
            Self::ContractsByStatus => "status",
            Self::ClauseCoverage => "clause",
            Self::ContractsByRiskLevel => "risk_level",
            Self::TopDelays => "contract_id",
            Self::SignaturesByMonth => "signature_month",
        }
    }

    #[must_use]
    pub const fn metric_label(self) -> &'static str {
        match self {
            Self::ValueByProject
            | Self::ValueByContractType
            | Self::TopSuppliersByValue
            | Self::CriticalValueBySupplier => "total_value",
            Self::ContractsByStatus
            | Self::ContractsByRiskLevel
            | Self::ClauseCoverage
            | Self::ProblemContractsByProject
            | Self::SignaturesByMonth
            | Self::CriticalByProject => "contracts",
            Self::EsgBySupplier => "mean_esg_score",
            Self::TopSuppliersByCompliance => "mean_compliance_pct",
            Self::PendingItemsByProject => "open_pending_items",
            Self::TopDelays => "delay_days",
            Self::MeanDurationByContractType => "mean_duration_days",
        }
    }

    /// Row cap for top-N views.
    #[must_use]
    pub const fn limit(self) -> Option<usize> {
        match self {
            Self::TopSuppliersByValue => Some(5),
            Self::TopSuppliersByCompliance | Self::TopDelays => Some(10),
            _ => None,
        }
    }
}

impl Display for ViewName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ModelError::UnknownView(s.to_string()))
    }
}

/// Reduced value of one group. `NoData` marks a reduction over zero values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Metric {
    Count(u64),
    Sum(f64),
    Mean(f64),
    Days(i64),
    NoData,
}

impl Metric {
    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::Count(v) => Some(v as f64),
            Self::Sum(v) | Self::Mean(v) => Some(v),
            Self::Days(v) => Some(v as f64),
            Self::NoData => None,
        }
    }

    #[must_use]
    pub const fn is_no_data(self) -> bool {
        matches!(self, Self::NoData)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryRow {
    pub key: String,
    pub metric: Metric,
}

impl SummaryRow {
    #[must_use]
    pub fn new(key: impl Into<String>, metric: Metric) -> Self {
        Self {
            key: key.into(),
            metric,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryTable {
    pub view: ViewName,
    pub key_label: String,
    pub metric_label: String,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    #[must_use]
    pub fn new(view: ViewName, rows: Vec<SummaryRow>) -> Self {
        Self {
            view,
            key_label: view.key_label().to_string(),
            metric_label: view.metric_label().to_string(),
            rows,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|r| r.key.as_str())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Metric> {
        self.rows.iter().find(|r| r.key == key).map(|r| r.metric)
    }

    /// Each group's fraction of the total, for proportion displays.
    #[must_use]
    pub fn shares(&self) -> Vec<(String, f64)> {
        let total: f64 = self.rows.iter().filter_map(|r| r.metric.as_f64()).sum();
        if total == 0.0 {
            return Vec::new();
        }
        self.rows
            .iter()
            .filter_map(|r| r.metric.as_f64().map(|v| (r.key.clone(), v / total)))
            .collect()
    }
}

/// KPI strip shown above the charts. `None` means no data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadlineMetrics {
    pub contract_count: u64,
    pub total_value: Option<f64>,
    pub mean_esg_score: Option<f64>,
    pub mean_compliance_pct: Option<f64>,
    pub open_pending_items: Option<u64>,
    pub delayed_contracts: u64,
    pub critical_contracts: u64,
    pub mean_duration_days: Option<f64>,
}
