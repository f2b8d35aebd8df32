// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    DependencyFailure = 4,
    Internal = 10,
}

impl ExitCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::Validation => "validation",
            Self::DependencyFailure => "dependency_failure",
            Self::Internal => "internal",
        }
    }
}

/// Stable machine codes carried in [`MachineError::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    UsageError,
    InvalidArgument,
    DatasetUnavailable,
    ExportFailed,
    InternalError,
}

pub const ERROR_CODES: [ErrorCode; 5] = [
    ErrorCode::UsageError,
    ErrorCode::InvalidArgument,
    ErrorCode::DatasetUnavailable,
    ErrorCode::ExportFailed,
    ErrorCode::InternalError,
];

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UsageError => "usage_error",
            Self::InvalidArgument => "invalid_argument",
            Self::DatasetUnavailable => "dataset_unavailable",
            Self::ExportFailed => "export_failed",
            Self::InternalError => "internal_error",
        }
    }

    #[must_use]
    pub const fn exit_code(self) -> ExitCode {
        match self {
            Self::UsageError => ExitCode::Usage,
            Self::InvalidArgument => ExitCode::Validation,
            Self::DatasetUnavailable | Self::ExportFailed => ExitCode::DependencyFailure,
            Self::InternalError => ExitCode::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl MachineError {
    #[must_use]
    pub fn new(code: ErrorCode, message: &str) -> Self {
        Self {
            code: code.as_str().to_string(),
            message: message.to_string(),
            details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for MachineError {}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, ExitCode, MachineError, ERROR_CODES};

    #[test]
    fn error_codes_are_unique_snake_case() {
        let mut seen = std::collections::BTreeSet::new();
        for code in ERROR_CODES {
            let text = code.as_str();
            assert!(text.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
            assert!(seen.insert(text), "duplicate code {text}");
        }
    }

    #[test]
    fn dataset_unavailable_maps_to_dependency_failure() {
        assert_eq!(
            ErrorCode::DatasetUnavailable.exit_code(),
            ExitCode::DependencyFailure
        );
        let err = MachineError::new(ErrorCode::DatasetUnavailable, "no data")
            .with_detail("source", "contracts.csv");
        assert_eq!(err.to_string(), "dataset_unavailable: no data");
        assert_eq!(err.details.get("source").map(String::as_str), Some("contracts.csv"));
    }
}
