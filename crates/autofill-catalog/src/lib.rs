#![doc = include_str!("../README.md")]

mod catalog;
mod error;
mod file;
pub mod format;
mod naming;

pub use catalog::{Catalog, EntryMetadata, Note};
pub use error::CatalogError;
pub use file::CatalogFile;
pub use format::{CatalogFormat, Destination, DumpOptions};
pub use naming::{
    NamingConvention, extract_locale, infer_domain, is_locale_token, matches_locale_and_domain,
    synthesize_target_path,
};
