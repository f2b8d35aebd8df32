// SPDX-License-Identifier: Apache-2.0

use hub_contracts_model::{ContractTable, FilterOptions, FilterSelection};

/// Rows matching every restricted column of `selection`, in table order.
///
/// An empty result is valid; callers degrade to "no data" displays.
#[must_use]
pub fn apply(table: &ContractTable, selection: &FilterSelection) -> ContractTable {
    let filtered = table.select(|record| selection.matches(record));
    tracing::debug!(
        input_rows = table.len(),
        output_rows = filtered.len(),
        restricted = selection.restricted_columns().count(),
        "filter applied"
    );
    filtered
}

#[must_use]
pub fn filter_options(table: &ContractTable) -> FilterOptions {
    FilterOptions::from_table(table)
}
