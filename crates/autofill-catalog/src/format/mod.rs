//! On-disk catalog formats.
//!
//! Each [`CatalogFormat`] variant dispatches to one [`CatalogAdapter`] that turns
//! file contents into a [`Catalog`] and back.

mod mapping;
mod php;
mod xliff;

use crate::{Catalog, CatalogError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Options honoured when dumping a catalog.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DumpOptions {
    /// Locale the catalog was translated from (XLIFF `source-language`).
    pub default_locale: Option<String>,
    /// Extension used when writing into a directory.
    pub target_extension: Option<String>,
}

/// Where a dumped catalog goes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Destination {
    /// Write exactly this file.
    File(PathBuf),
    /// Write `<domain>.<locale>.<ext>` inside this directory.
    Directory(PathBuf),
}

/// Parse and serialize one catalog format.
pub trait CatalogAdapter {
    /// Parse file contents into a catalog.
    fn parse(&self, content: &str, locale: &str, domain: &str) -> Result<Catalog, CatalogError>;

    /// Serialize a catalog into file contents.
    fn dump(&self, catalog: &Catalog, options: &DumpOptions) -> Result<String, CatalogError>;
}

/// The catalog formats understood by the tool.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    /// XLIFF 1.2 markup.
    #[default]
    Xliff,
    /// YAML key/value text.
    Yaml,
    /// JSON mapping.
    Json,
    /// PHP array literal.
    Php,
}

impl CatalogFormat {
    pub const ALL: [CatalogFormat; 4] = [
        CatalogFormat::Xliff,
        CatalogFormat::Yaml,
        CatalogFormat::Json,
        CatalogFormat::Php,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogFormat::Xliff => "xliff",
            CatalogFormat::Yaml => "yaml",
            CatalogFormat::Json => "json",
            CatalogFormat::Php => "php",
        }
    }

    /// File extensions that belong to this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            CatalogFormat::Xliff => &["xlf", "xliff"],
            CatalogFormat::Yaml => &["yaml", "yml"],
            CatalogFormat::Json => &["json"],
            CatalogFormat::Php => &["php"],
        }
    }

    /// Extension used for newly written files when none is requested.
    pub fn default_extension(&self) -> &'static str {
        match self {
            CatalogFormat::Xliff => "xlf",
            CatalogFormat::Yaml => "yml",
            CatalogFormat::Json => "json",
            CatalogFormat::Php => "php",
        }
    }

    /// Whether the file extension belongs to this format.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }

    /// Detect the format from a file extension. Unknown extensions are treated as XLIFF.
    pub fn detect(path: &Path) -> Self {
        Self::ALL
            .into_iter()
            .find(|format| format.matches(path))
            .unwrap_or_default()
    }

    /// Whether entry metadata (ids, notes, target attributes) survives a dump.
    pub fn keeps_metadata(&self) -> bool {
        matches!(self, CatalogFormat::Xliff)
    }

    fn adapter(&self) -> &'static dyn CatalogAdapter {
        match self {
            CatalogFormat::Xliff => &xliff::XliffAdapter,
            CatalogFormat::Yaml => &mapping::YamlAdapter,
            CatalogFormat::Json => &mapping::JsonAdapter,
            CatalogFormat::Php => &php::PhpAdapter,
        }
    }

    /// Load a catalog from disk. A missing file yields an empty catalog.
    pub fn load(&self, path: &Path, locale: &str, domain: &str) -> Result<Catalog, CatalogError> {
        if !path.exists() {
            tracing::debug!("{} does not exist, starting empty", path.display());
            return Ok(Catalog::new(locale, domain));
        }

        let content = fs_err::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Catalog::new(locale, domain));
        }

        self.adapter()
            .parse(&content, locale, domain)
            .map_err(|source| CatalogError::Malformed {
                path: path.to_path_buf(),
                source: Box::new(source),
            })
    }

    /// Serialize a catalog.
    pub fn dump(&self, catalog: &Catalog, options: &DumpOptions) -> Result<String, CatalogError> {
        self.adapter().dump(catalog, options)
    }

    /// Serialize a catalog and write it, returning the written path.
    pub fn write(
        &self,
        catalog: &Catalog,
        options: &DumpOptions,
        destination: &Destination,
    ) -> Result<PathBuf, CatalogError> {
        let path = match destination {
            Destination::File(path) => path.clone(),
            Destination::Directory(dir) => {
                let ext = options
                    .target_extension
                    .as_deref()
                    .unwrap_or_else(|| self.default_extension());
                dir.join(format!("{}.{}.{}", catalog.domain(), catalog.locale(), ext))
            },
        };

        let content = self.dump(catalog, options)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs_err::create_dir_all(parent)?;
        }
        fs_err::write(&path, content)?;
        tracing::debug!("wrote {} entries to {}", catalog.len(), path.display());

        Ok(path)
    }
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xliff" | "xlf" => Ok(CatalogFormat::Xliff),
            "yaml" | "yml" => Ok(CatalogFormat::Yaml),
            "json" => Ok(CatalogFormat::Json),
            "php" => Ok(CatalogFormat::Php),
            other => Err(format!(
                "unknown catalog format '{other}' (expected one of: xliff, yaml, json, php)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_format_by_extension() {
        assert_eq!(CatalogFormat::detect(Path::new("messages.en.xlf")), CatalogFormat::Xliff);
        assert_eq!(CatalogFormat::detect(Path::new("messages.en.xliff")), CatalogFormat::Xliff);
        assert_eq!(CatalogFormat::detect(Path::new("messages.en.yaml")), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::detect(Path::new("messages.en.yml")), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::detect(Path::new("messages.en.json")), CatalogFormat::Json);
        assert_eq!(CatalogFormat::detect(Path::new("messages.en.php")), CatalogFormat::Php);
        assert_eq!(
            CatalogFormat::detect(Path::new("messages.en.unknown")),
            CatalogFormat::Xliff
        );
    }

    #[test]
    fn test_only_xliff_keeps_metadata() {
        let keeping: Vec<_> = CatalogFormat::ALL
            .into_iter()
            .filter(CatalogFormat::keeps_metadata)
            .collect();
        assert_eq!(keeping, vec![CatalogFormat::Xliff]);
    }

    #[test]
    fn test_from_str_accepts_aliases() {
        assert_eq!("XLIFF".parse::<CatalogFormat>().unwrap(), CatalogFormat::Xliff);
        assert_eq!("yml".parse::<CatalogFormat>().unwrap(), CatalogFormat::Yaml);
        assert!("po".parse::<CatalogFormat>().is_err());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let catalog = CatalogFormat::Xliff
            .load(Path::new("/non/existent/file.xlf"), "en", "messages")
            .unwrap();
        assert_eq!(catalog.locale(), "en");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_write_into_directory_uses_domain_and_locale() {
        let temp = TempDir::new().unwrap();
        let mut catalog = Catalog::new("de", "validators");
        catalog.set("hello", "Hallo");

        let options = DumpOptions {
            default_locale: Some("en".to_string()),
            target_extension: Some("yaml".to_string()),
        };
        let written = CatalogFormat::Yaml
            .write(&catalog, &options, &Destination::Directory(temp.path().to_path_buf()))
            .unwrap();

        assert_eq!(written, temp.path().join("validators.de.yaml"));
        let reloaded = CatalogFormat::Yaml.load(&written, "de", "validators").unwrap();
        assert_eq!(reloaded.get("hello"), Some("Hallo"));
    }

    #[test]
    fn test_load_reports_malformed_file_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("messages.en.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = CatalogFormat::Json.load(&path, "en", "messages").unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
        assert!(err.to_string().contains("messages.en.json"));
    }
}
