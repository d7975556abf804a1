use crate::naming::{extract_locale, infer_domain};
use std::path::{Path, PathBuf};

/// A catalog file found during discovery, with what its name tells about it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CatalogFile {
    path: PathBuf,
    locale: Option<String>,
    domain: String,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let locale = extract_locale(&path).map(str::to_string);
        let domain = infer_domain(&path).to_string();
        Self {
            path,
            locale,
            domain,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The locale token in the file name, if any.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}
