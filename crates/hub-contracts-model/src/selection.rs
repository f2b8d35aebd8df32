// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::contract::{Column, ContractRecord};
use crate::error::ModelError;
use crate::table::ContractTable;

/// Categorical columns a user may restrict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FilterableColumn {
    Project,
    Status,
    Supplier,
    ContractType,
    RiskLevel,
}

impl FilterableColumn {
    pub const ALL: [FilterableColumn; 5] = [
        FilterableColumn::Project,
        FilterableColumn::Status,
        FilterableColumn::Supplier,
        FilterableColumn::ContractType,
        FilterableColumn::RiskLevel,
    ];

    #[must_use]
    pub const fn column(self) -> Column {
        match self {
            Self::Project => Column::Project,
            Self::Status => Column::Status,
            Self::Supplier => Column::Supplier,
            Self::ContractType => Column::ContractType,
            Self::RiskLevel => Column::RiskLevel,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.column().name()
    }
}

impl Display for FilterableColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterableColumn {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let column: Column = s.parse()?;
        column
            .filterable()
            .ok_or_else(|| ModelError::NotFilterable(s.to_string()))
    }
}

/// Allowed values per filterable column.
///
/// A column without an entry is unrestricted. A column mapped to an empty set
/// matches no rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSelection {
    allowed: BTreeMap<FilterableColumn, BTreeSet<String>>,
}

impl FilterSelection {
    #[must_use]
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Every filterable column mapped to its full distinct-value set.
    #[must_use]
    pub fn all(table: &ContractTable) -> Self {
        let options = FilterOptions::from_table(table);
        let mut selection = Self::default();
        for column in FilterableColumn::ALL {
            selection.restrict(column, options.values(column).iter().cloned());
        }
        selection
    }

    #[must_use]
    pub fn with_values<I, S>(mut self, column: FilterableColumn, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.restrict(column, values);
        self
    }

    /// Replaces the allowed set for `column`.
    pub fn restrict<I, S>(&mut self, column: FilterableColumn, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed
            .insert(column, values.into_iter().map(Into::into).collect());
    }

    /// Drops the restriction on `column`.
    pub fn clear(&mut self, column: FilterableColumn) {
        self.allowed.remove(&column);
    }

    #[must_use]
    pub fn allowed(&self, column: FilterableColumn) -> Option<&BTreeSet<String>> {
        self.allowed.get(&column)
    }

    pub fn restricted_columns(&self) -> impl Iterator<Item = FilterableColumn> + '_ {
        self.allowed.keys().copied()
    }

    #[must_use]
    pub fn matches(&self, record: &ContractRecord) -> bool {
        self.allowed
            .iter()
            .all(|(column, values)| values.contains(record.category(*column)))
    }
}

/// Sorted distinct values per filterable column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    values: BTreeMap<FilterableColumn, Vec<String>>,
}

impl FilterOptions {
    #[must_use]
    pub fn from_table(table: &ContractTable) -> Self {
        let mut distinct: BTreeMap<FilterableColumn, BTreeSet<&str>> = FilterableColumn::ALL
            .into_iter()
            .map(|c| (c, BTreeSet::new()))
            .collect();
        for record in table.rows() {
            for column in FilterableColumn::ALL {
                distinct
                    .entry(column)
                    .or_default()
                    .insert(record.category(column));
            }
        }
        Self {
            values: distinct
                .into_iter()
                .map(|(c, set)| (c, set.into_iter().map(ToString::to_string).collect()))
                .collect(),
        }
    }

    #[must_use]
    pub fn values(&self, column: FilterableColumn) -> &[String] {
        self.values.get(&column).map_or(&[], Vec::as_slice)
    }
}
