//! Core types, errors, and configuration resolution.

mod config;
mod errors;

pub use config::*;
pub use errors::*;
