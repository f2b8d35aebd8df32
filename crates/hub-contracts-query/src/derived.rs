// SPDX-License-Identifier: Apache-2.0

use hub_contracts_model::{AugmentedContract, AugmentedTable, ContractRecord, ContractTable};

/// Whole days from signature to termination; negative values are kept.
#[must_use]
pub fn duration_days(record: &ContractRecord) -> Option<i64> {
    match (record.signature_date, record.termination_date) {
        (Some(signed), Some(ends)) => Some((ends - signed).num_days()),
        _ => None,
    }
}

#[must_use]
pub fn augment(table: &ContractTable) -> AugmentedTable {
    AugmentedTable::from_rows(
        table
            .rows()
            .iter()
            .map(|record| AugmentedContract {
                duration_days: duration_days(record),
                record: record.clone(),
            })
            .collect(),
    )
}
