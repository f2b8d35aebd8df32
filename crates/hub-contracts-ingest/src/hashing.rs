// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use hub_contracts_core::sha256_hex;

use crate::LoadError;

#[must_use]
pub fn hash_bytes(bytes: &[u8]) -> String {
    sha256_hex(bytes)
}

pub fn hash_file(path: &Path) -> Result<String, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(hash_bytes(&bytes))
}
