// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStage {
    Read,
    Parse,
    Validate,
    Cache,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadEvent {
    pub stage: LoadStage,
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

/// Staged event log kept alongside the tracing output of a load.
#[derive(Debug, Default, Clone)]
pub struct LoadLog {
    events: Vec<LoadEvent>,
}

impl LoadLog {
    pub fn emit(&mut self, stage: LoadStage, name: impl Into<String>, fields: BTreeMap<String, String>) {
        let name = name.into();
        tracing::debug!(stage = ?stage, event = %name, fields = ?fields, "dataset load");
        self.events.push(LoadEvent {
            stage,
            name,
            fields,
        });
    }

    #[must_use]
    pub fn events(&self) -> &[LoadEvent] {
        &self.events
    }
}
