// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod derived;
mod filters;
mod pipeline;
mod views;

pub use derived::{augment, duration_days};
pub use filters::{apply, filter_options};
pub use pipeline::{run, view, DashboardSnapshot, PipelineNote};
pub use views::{compute_all, compute_view, headline_metrics, PROBLEM_STATUSES};

pub const CRATE_NAME: &str = "hub-contracts-query";
