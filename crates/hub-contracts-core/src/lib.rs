// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Shared foundations for the contract dashboard workspace.
//!
//! Everything here is dependency-light and deterministic: process exit codes,
//! the machine-readable error envelope, canonical JSON encoding and the
//! environment-driven configuration lookups.

mod domain;
mod errors;

pub use domain::canonical;
pub use domain::canonical::{sha256_hex, Hash256};
pub use domain::config::{
    log_json_enabled, resolve_log_filter, resolve_source_path, DEFAULT_LOG_FILTER,
    DEFAULT_SOURCE_FILE,
};
pub use errors::{ErrorCode, ErrorContext, ExitCode, MachineError, ResultExt, ERROR_CODES};

pub const CRATE_NAME: &str = "hub-contracts-core";

pub const ENV_HUB_CONTRACTS_SOURCE: &str = "HUB_CONTRACTS_SOURCE";
pub const ENV_HUB_LOG_LEVEL: &str = "HUB_LOG_LEVEL";
pub const ENV_HUB_LOG_JSON: &str = "HUB_LOG_JSON";
