//! CLI command implementations.

mod autofill;
mod usage;

pub use autofill::*;
pub use usage::{UsageArgs, run_usage};
