// SPDX-License-Identifier: Apache-2.0

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("invalid contract id `{value}`: {reason}")]
    InvalidContractId { value: String, reason: &'static str },
    #[error("duplicate contract id `{0}`")]
    DuplicateContractId(String),
    #[error("unknown column `{0}`")]
    UnknownColumn(String),
    #[error("column `{0}` is not filterable")]
    NotFilterable(String),
    #[error("unknown view `{0}`")]
    UnknownView(String),
}
