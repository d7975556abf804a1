#![doc = include_str!("../README.md")]

use autofill_catalog::CatalogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "autofill.toml";

#[derive(Debug, Error)]
pub enum AutofillConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {}", path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A locale is not a valid language identifier.
    #[error("Invalid language identifier '{name}'")]
    InvalidLanguageIdentifier {
        /// The invalid identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
    /// A locale uses an unsupported subtag combination.
    #[error("Language identifier '{name}' is not supported: {reason}")]
    UnsupportedLanguageIdentifier {
        /// The invalid identifier.
        name: String,
        /// Explanation of why it is not supported.
        reason: String,
    },
}

/// The contents of `autofill.toml`. Every field is optional.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AutofillToml {
    /// Translation file or directory to scan.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Locale the source catalog is written in.
    #[serde(default)]
    pub source_locale: Option<String>,
    /// Locales to fill in.
    #[serde(default)]
    pub target_locales: Option<Vec<String>>,
    /// Catalog format to process.
    #[serde(default)]
    pub format: Option<CatalogFormat>,
    /// Translation domain.
    #[serde(default)]
    pub domain: Option<String>,
    /// Whether written entries are flagged for review.
    #[serde(default)]
    pub mark_auto_translated: Option<bool>,
    /// Base URL of the translation API.
    #[serde(default)]
    pub api_url: Option<String>,
}

impl AutofillToml {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, AutofillConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AutofillConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs_err::read_to_string(path)?;
        let config: AutofillToml = toml::from_str(&content)?;

        Ok(config)
    }

    /// Reads `autofill.toml` from a directory if it exists.
    pub fn discover(dir: &Path) -> Result<Option<Self>, AutofillConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::read_from_path(path).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Validate a locale and return its canonical spelling (`DE` -> `de`, `pt_br` -> `pt-BR`).
pub fn canonical_locale(name: &str) -> Result<String, AutofillConfigError> {
    let lang = name.parse::<LanguageIdentifier>().map_err(|source| {
        AutofillConfigError::InvalidLanguageIdentifier {
            name: name.to_string(),
            source,
        }
    })?;

    ensure_supported_language_identifier(&lang, name)?;
    Ok(lang.to_string())
}

fn ensure_supported_language_identifier(
    lang: &LanguageIdentifier,
    original: &str,
) -> Result<(), AutofillConfigError> {
    if lang.variants().next().is_some() {
        return Err(AutofillConfigError::UnsupportedLanguageIdentifier {
            name: original.to_string(),
            reason: "variants are not supported".to_string(),
        });
    }

    if lang.language.as_str().len() != 2 {
        return Err(AutofillConfigError::UnsupportedLanguageIdentifier {
            name: original.to_string(),
            reason: "only two-letter language codes can be used in catalog file names".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_from_path_success() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

        let config_content = r#"
source_locale = "en"
target_locales = ["de", "fr"]
format = "yaml"
domain = "validators"
mark_auto_translated = false
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = AutofillToml::read_from_path(&config_path).unwrap();
        assert_eq!(config.source_locale.as_deref(), Some("en"));
        assert_eq!(
            config.target_locales,
            Some(vec!["de".to_string(), "fr".to_string()])
        );
        assert_eq!(config.format, Some(CatalogFormat::Yaml));
        assert_eq!(config.domain.as_deref(), Some("validators"));
        assert_eq!(config.mark_auto_translated, Some(false));
        assert!(config.path.is_none());
    }

    #[test]
    fn test_read_from_path_file_not_found() {
        let result = AutofillToml::read_from_path("/non/existent/path/autofill.toml");
        assert!(matches!(result, Err(AutofillConfigError::NotFound { .. })));
    }

    #[test]
    fn test_read_from_path_rejects_api_key() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "api_key = \"secret\"\n").unwrap();

        let result = AutofillToml::read_from_path(&config_path);
        assert!(matches!(result, Err(AutofillConfigError::ParseError(_))));
    }

    #[test]
    fn test_read_from_path_rejects_unknown_format() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "format = \"po\"\n").unwrap();

        let result = AutofillToml::read_from_path(&config_path);
        assert!(matches!(result, Err(AutofillConfigError::ParseError(_))));
    }

    #[test]
    fn test_discover_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        assert!(AutofillToml::discover(temp_dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_discover_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "path = \"i18n\"\n",
        )
        .unwrap();

        let config = AutofillToml::discover(temp_dir.path()).unwrap().unwrap();
        assert_eq!(config.path, Some(PathBuf::from("i18n")));
    }

    #[rstest]
    #[case("de", "de")]
    #[case("DE", "de")]
    #[case("pt-BR", "pt-BR")]
    #[case("zh-Hans", "zh-Hans")]
    #[case("pt_br", "pt-BR")]
    #[case("zh-hans-cn", "zh-Hans-CN")]
    #[case("es-419", "es-419")]
    fn test_canonical_locale(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(canonical_locale(input).unwrap(), expected);
    }

    #[test]
    fn test_canonical_locale_invalid() {
        let result = canonical_locale("not a locale!");
        assert!(matches!(
            result,
            Err(AutofillConfigError::InvalidLanguageIdentifier { name, .. })
                if name == "not a locale!"
        ));
    }

    #[rstest]
    #[case("de-1996")]
    #[case("deu")]
    #[case("gsw-CH")]
    fn test_canonical_locale_rejects_unsupported(#[case] input: &str) {
        let result = canonical_locale(input);
        assert!(matches!(
            result,
            Err(AutofillConfigError::UnsupportedLanguageIdentifier { .. })
        ));
    }
}
