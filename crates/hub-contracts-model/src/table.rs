// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::contract::{CellValue, Column, ContractId, ContractRecord};
use crate::error::ModelError;

/// Contract rows in source order, with unique contract ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractTable {
    rows: Vec<ContractRecord>,
}

impl ContractTable {
    pub fn new(rows: Vec<ContractRecord>) -> Result<Self, ModelError> {
        let mut seen = BTreeSet::new();
        for row in &rows {
            if !seen.insert(row.contract_id.as_str()) {
                return Err(ModelError::DuplicateContractId(
                    row.contract_id.as_str().to_string(),
                ));
            }
        }
        Ok(Self { rows })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rows(&self) -> &[ContractRecord] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<ContractRecord> {
        self.rows
    }

    /// Copies the rows accepted by `keep`, preserving their order.
    #[must_use]
    pub fn select<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&ContractRecord) -> bool,
    {
        Self {
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedContract {
    #[serde(flatten)]
    pub record: ContractRecord,
    /// Termination minus signature in whole days; absent unless both dates are.
    pub duration_days: Option<i64>,
}

impl AugmentedContract {
    #[must_use]
    pub fn cell(&self, column: Column) -> CellValue<'_> {
        match column {
            Column::DurationDays => self
                .duration_days
                .map_or(CellValue::Missing, CellValue::Integer),
            other => self.record.cell(other),
        }
    }
}

/// Filtered rows paired with their derived fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AugmentedTable {
    rows: Vec<AugmentedContract>,
}

impl AugmentedTable {
    #[must_use]
    pub fn from_rows(rows: Vec<AugmentedContract>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[AugmentedContract] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &ContractRecord> + '_ {
        self.rows.iter().map(|r| &r.record)
    }

    /// Ids of rows whose termination date precedes their signature date.
    #[must_use]
    pub fn negative_durations(&self) -> Vec<&ContractId> {
        self.rows
            .iter()
            .filter(|r| r.duration_days.is_some_and(|d| d < 0))
            .map(|r| &r.record.contract_id)
            .collect()
    }
}
