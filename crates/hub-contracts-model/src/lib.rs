// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Contract dashboard model SSOT.
//!
//! ```compile_fail
//! use hub_contracts_model::FilterableColumn;
//!
//! fn exhaustive_match(c: FilterableColumn) -> &'static str {
//!     match c {
//!         FilterableColumn::Project => "p",
//!         FilterableColumn::Status => "s",
//!     }
//! }
//! ```

mod contract;
mod error;
mod selection;
mod summary;
mod table;

pub use contract::{CellValue, ClauseFlag, Column, ContractId, ContractRecord};
pub use error::ModelError;
pub use selection::{FilterOptions, FilterSelection, FilterableColumn};
pub use summary::{HeadlineMetrics, Metric, SummaryRow, SummaryTable, ViewName};
pub use table::{AugmentedContract, AugmentedTable, ContractTable};

pub const CRATE_NAME: &str = "hub-contracts-model";
