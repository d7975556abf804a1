use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading or writing a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading or writing the file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The XLIFF document could not be parsed or written.
    #[error("invalid XLIFF: {0}")]
    Xml(String),
    /// The YAML document could not be parsed or written.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The JSON document could not be parsed or written.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The PHP array literal could not be parsed.
    #[error("invalid PHP catalog at byte {offset}: {message}")]
    Php {
        /// Byte offset of the offending token.
        offset: usize,
        /// What the parser expected.
        message: String,
    },
    /// The document root is not a key/value mapping.
    #[error("expected a mapping of translation keys at the document root")]
    NotAMapping,
    /// Parsing a specific file failed.
    #[error("{}: {source}", path.display())]
    Malformed {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: Box<CatalogError>,
    },
}

impl From<quick_xml::Error> for CatalogError {
    fn from(err: quick_xml::Error) -> Self {
        CatalogError::Xml(err.to_string())
    }
}
