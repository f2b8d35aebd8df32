// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;
use std::collections::BTreeMap;

use hub_contracts_model::{
    AugmentedContract, AugmentedTable, ClauseFlag, HeadlineMetrics, Metric, SummaryRow,
    SummaryTable, ViewName,
};

/// Statuses counted by `problem_contracts_by_project`.
pub const PROBLEM_STATUSES: [&str; 2] = ["Rescindido", "Inadimplente"];

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    total: f64,
    seen: u64,
}

impl Accumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.total += value;
            self.seen += 1;
        }
    }

    fn sum(self) -> Option<f64> {
        (self.seen > 0).then_some(self.total)
    }

    fn mean(self) -> Option<f64> {
        (self.seen > 0).then(|| self.total / self.seen as f64)
    }
}

fn grouped<'a, K, V>(
    rows: impl Iterator<Item = &'a AugmentedContract>,
    key: K,
    value: V,
) -> BTreeMap<String, Accumulator>
where
    K: Fn(&'a AugmentedContract) -> String,
    V: Fn(&'a AugmentedContract) -> Option<f64>,
{
    let mut groups: BTreeMap<String, Accumulator> = BTreeMap::new();
    for row in rows {
        let key = key(row);
        // Rows without a grouping key are left out of grouped views.
        if key.is_empty() {
            continue;
        }
        groups.entry(key).or_default().push(value(row));
    }
    groups
}

fn sums(groups: BTreeMap<String, Accumulator>) -> Vec<SummaryRow> {
    groups
        .into_iter()
        .map(|(key, acc)| SummaryRow::new(key, acc.sum().map_or(Metric::NoData, Metric::Sum)))
        .collect()
}

fn means(groups: BTreeMap<String, Accumulator>) -> Vec<SummaryRow> {
    groups
        .into_iter()
        .map(|(key, acc)| SummaryRow::new(key, acc.mean().map_or(Metric::NoData, Metric::Mean)))
        .collect()
}

fn counts(groups: BTreeMap<String, Accumulator>) -> Vec<SummaryRow> {
    groups
        .into_iter()
        .map(|(key, acc)| SummaryRow::new(key, Metric::Count(acc.seen)))
        .collect()
}

fn present(_: &AugmentedContract) -> Option<f64> {
    Some(1.0)
}

/// Descending by metric; `NoData` last; ties keep their prior order.
fn rank_descending(rows: &mut [SummaryRow]) {
    rows.sort_by(|a, b| match (a.metric.as_f64(), b.metric.as_f64()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn ranked(view: ViewName, mut rows: Vec<SummaryRow>) -> Vec<SummaryRow> {
    rank_descending(&mut rows);
    if let Some(limit) = view.limit() {
        rows.truncate(limit);
    }
    rows
}

fn value_of(row: &AugmentedContract) -> Option<f64> {
    row.record.total_value
}

/// Computes one catalog view over `table`. Never fails; an empty table yields
/// an empty summary.
#[must_use]
pub fn compute_view(view: ViewName, table: &AugmentedTable) -> SummaryTable {
    let all = || table.rows().iter();
    let project = |r: &AugmentedContract| r.record.project.clone();
    let supplier = |r: &AugmentedContract| r.record.supplier.clone();
    let contract_type = |r: &AugmentedContract| r.record.contract_type.clone();

    let rows = match view {
        ViewName::ValueByProject => sums(grouped(all(), project, value_of)),
        ViewName::ValueByContractType => sums(grouped(all(), contract_type, value_of)),
        ViewName::TopSuppliersByValue => ranked(view, sums(grouped(all(), supplier, value_of))),
        ViewName::ContractsByStatus => {
            counts(grouped(all(), |r| r.record.status.clone(), present))
        }
        ViewName::EsgBySupplier => ranked(
            view,
            means(grouped(all(), supplier, |r| r.record.esg_score)),
        ),
        ViewName::TopSuppliersByCompliance => ranked(
            view,
            means(grouped(all(), supplier, |r| r.record.compliance_score_pct)),
        ),
        ViewName::ClauseCoverage => clause_coverage(table),
        ViewName::ContractsByRiskLevel => {
            counts(grouped(all(), |r| r.record.risk_level.clone(), present))
        }
        ViewName::PendingItemsByProject => sums(grouped(all(), project, |r| {
            r.record.open_pending_items.map(|n| n as f64)
        })),
        ViewName::TopDelays => top_delays(view, table),
        ViewName::ProblemContractsByProject => counts(grouped(
            all().filter(|r| PROBLEM_STATUSES.contains(&r.record.status.as_str())),
            project,
            present,
        )),
        ViewName::SignaturesByMonth => counts(grouped(
            all().filter(|r| r.record.signature_date.is_some()),
            |r| {
                r.record
                    .signature_date
                    .map(|d| d.format("%Y-%m").to_string())
                    .unwrap_or_default()
            },
            present,
        )),
        ViewName::CriticalByProject => counts(grouped(
            all().filter(|r| r.record.critical_stakeholder),
            project,
            present,
        )),
        ViewName::CriticalValueBySupplier => sums(grouped(
            all().filter(|r| r.record.critical_stakeholder),
            supplier,
            value_of,
        )),
        ViewName::MeanDurationByContractType => means(grouped(all(), contract_type, |r| {
            r.duration_days.map(|d| d as f64)
        })),
    };
    SummaryTable::new(view, rows)
}

fn clause_coverage(table: &AugmentedTable) -> Vec<SummaryRow> {
    if table.is_empty() {
        return Vec::new();
    }
    ClauseFlag::ALL
        .into_iter()
        .map(|flag| {
            let covered = table.records().filter(|r| r.clause(flag)).count() as u64;
            SummaryRow::new(flag.column().header(), Metric::Count(covered))
        })
        .collect()
}

fn top_delays(view: ViewName, table: &AugmentedTable) -> Vec<SummaryRow> {
    let rows: Vec<SummaryRow> = table
        .records()
        .filter_map(|r| {
            r.delay_days
                .filter(|d| *d > 0)
                .map(|d| SummaryRow::new(r.contract_id.as_str(), Metric::Days(d)))
        })
        .collect();
    ranked(view, rows)
}

/// Every catalog view, in catalog order.
#[must_use]
pub fn compute_all(table: &AugmentedTable) -> Vec<SummaryTable> {
    ViewName::ALL
        .into_iter()
        .map(|view| compute_view(view, table))
        .collect()
}

#[must_use]
pub fn headline_metrics(table: &AugmentedTable) -> HeadlineMetrics {
    let mut value = Accumulator::default();
    let mut esg = Accumulator::default();
    let mut compliance = Accumulator::default();
    let mut duration = Accumulator::default();
    let mut metrics = HeadlineMetrics {
        contract_count: table.len() as u64,
        ..HeadlineMetrics::default()
    };
    for row in table.rows() {
        let record = &row.record;
        value.push(record.total_value);
        esg.push(record.esg_score);
        compliance.push(record.compliance_score_pct);
        duration.push(row.duration_days.map(|d| d as f64));
        if let Some(pending) = record.open_pending_items {
            metrics.open_pending_items = Some(
                metrics
                    .open_pending_items
                    .map_or(pending, |total| total.saturating_add(pending)),
            );
        }
        if record.delay_days.is_some_and(|d| d > 0) {
            metrics.delayed_contracts += 1;
        }
        if record.critical_stakeholder {
            metrics.critical_contracts += 1;
        }
    }
    metrics.total_value = value.sum();
    metrics.mean_esg_score = esg.mean();
    metrics.mean_compliance_pct = compliance.mean();
    metrics.mean_duration_days = duration.mean();
    metrics
}

#[cfg(test)]
mod tests {
    use super::{rank_descending, Accumulator};
    use hub_contracts_model::{Metric, SummaryRow};

    #[test]
    fn accumulator_reports_no_data_instead_of_zero() {
        let mut acc = Accumulator::default();
        acc.push(None);
        assert_eq!(acc.sum(), None);
        assert_eq!(acc.mean(), None);
        acc.push(Some(4.0));
        acc.push(Some(2.0));
        assert_eq!(acc.sum(), Some(6.0));
        assert_eq!(acc.mean(), Some(3.0));
    }

    #[test]
    fn ranking_is_stable_and_puts_no_data_last() {
        let mut rows = vec![
            SummaryRow::new("a", Metric::NoData),
            SummaryRow::new("b", Metric::Mean(2.0)),
            SummaryRow::new("c", Metric::Mean(5.0)),
            SummaryRow::new("d", Metric::Mean(2.0)),
        ];
        rank_descending(&mut rows);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["c", "b", "d", "a"]);
    }
}
