// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

pub const DEFAULT_SOURCE_FILE: &str = "inteligencia_contratual_limpa.csv";
pub const DEFAULT_LOG_FILTER: &str = "warn";

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Dataset location: explicit path, then `HUB_CONTRACTS_SOURCE`, then the
/// default file name in the working directory.
#[must_use]
pub fn resolve_source_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        if !path.as_os_str().is_empty() {
            return path.to_path_buf();
        }
    }
    if let Some(value) = non_empty_env(crate::ENV_HUB_CONTRACTS_SOURCE) {
        return PathBuf::from(value);
    }
    PathBuf::from(DEFAULT_SOURCE_FILE)
}

#[must_use]
pub fn resolve_log_filter() -> String {
    non_empty_env(crate::ENV_HUB_LOG_LEVEL)
        .or_else(|| non_empty_env("RUST_LOG"))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[must_use]
pub fn log_json_enabled() -> bool {
    non_empty_env(crate::ENV_HUB_LOG_JSON)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::resolve_source_path;
    use std::path::Path;

    #[test]
    fn explicit_source_wins() {
        let path = resolve_source_path(Some(Path::new("data/contracts.csv")));
        assert_eq!(path, Path::new("data/contracts.csv"));
    }
}
