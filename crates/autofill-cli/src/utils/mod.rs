//! Utility functions shared across CLI commands.

mod discovery;
pub mod languages;
mod prompt;
pub mod ui;

pub use discovery::{FilesByDirectory, collect_files, discover_catalog_files};
pub use prompt::{Confirm, StdinPrompt, is_affirmative};
