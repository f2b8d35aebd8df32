// SPDX-License-Identifier: Apache-2.0

mod context;
mod model;

pub use context::{ErrorContext, ResultExt};
pub use model::{ErrorCode, ExitCode, MachineError, ERROR_CODES};
