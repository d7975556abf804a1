//! CLI error types using miette for diagnostics with codes and help text.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Error when no API key was provided.
#[derive(Debug, Diagnostic, Error)]
#[error("DeepL API key is required")]
#[diagnostic(
    code(translation_autofill::config::missing_api_key),
    help("Provide it via --api-key or the DEEPL_API_KEY environment variable")
)]
pub struct MissingApiKeyError;

/// Error when no target locale was requested.
#[derive(Debug, Diagnostic, Error)]
#[error("at least one target locale is required")]
#[diagnostic(
    code(translation_autofill::config::no_target_locales),
    help("Use -t/--target-locales, or set target_locales in autofill.toml")
)]
pub struct NoTargetLocalesError;

/// Error when a locale is not a usable language identifier.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid language identifier: {identifier}")]
#[diagnostic(
    code(translation_autofill::config::invalid_language),
    help("Use a valid BCP 47 language tag (e.g., 'de', 'pt-BR', 'zh-Hans')")
)]
pub struct InvalidLanguageError {
    /// The invalid language identifier.
    pub identifier: String,
}

/// Error when an explicitly requested config file does not exist.
#[derive(Debug, Diagnostic, Error)]
#[error("configuration file not found: {}", path.display())]
#[diagnostic(
    code(translation_autofill::config::not_found),
    help("Check the --config path, or omit it to use ./autofill.toml when present")
)]
pub struct ConfigNotFoundError {
    /// The path that was given.
    pub path: PathBuf,
}

/// Error when parsing the autofill.toml configuration file.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse autofill.toml configuration")]
#[diagnostic(code(translation_autofill::config::parse_error))]
pub struct ConfigParseError {
    /// The source content of the config file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The span where the error occurred.
    #[label("error occurred here")]
    pub span: Option<SourceSpan>,

    /// The underlying parse error message.
    #[help]
    pub help: String,
}

/// Error when discovery finds nothing to work on.
#[derive(Debug, Diagnostic, Error)]
#[error("no {format} translation files found in: {}", path.display())]
#[diagnostic(
    code(translation_autofill::discovery::no_files),
    help("Check the path, or select another format with --format")
)]
pub struct NoCatalogFilesError {
    /// The scanned path.
    pub path: PathBuf,
    /// The requested format.
    pub format: String,
}

/// Error when a single file was given that does not belong to the format.
#[derive(Debug, Diagnostic, Error)]
#[error("file does not match format {format}: {}", path.display())]
#[diagnostic(
    code(translation_autofill::discovery::format_mismatch),
    help("Expected one of these extensions: {extensions}")
)]
pub struct FormatMismatchError {
    /// The given file.
    pub path: PathBuf,
    /// The requested format.
    pub format: String,
    /// Comma-separated list of accepted extensions.
    pub extensions: String,
}

/// Error when the provider fails while translating a locale.
#[derive(Debug, Diagnostic, Error)]
#[error("translation to '{locale}' failed")]
#[diagnostic(code(translation_autofill::provider::translation_failed))]
pub struct TranslationFailedError {
    /// The target locale being translated.
    pub locale: String,

    /// The provider error message.
    #[help]
    pub help: String,
}

/// Error when the provider quota cannot be fetched by the `usage` command.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to fetch API usage")]
#[diagnostic(code(translation_autofill::provider::usage))]
pub struct UsageUnavailableError {
    /// The provider error message.
    #[help]
    pub help: String,
}

/// Error when there is no source catalog to translate from.
#[derive(Debug, Diagnostic, Error)]
#[error("source file not found for locale '{locale}' and domain '{domain}'")]
#[diagnostic(
    code(translation_autofill::merge::source_not_found),
    help(
        "Name the source catalog like '{domain}.{locale}.<ext>' or '{locale}.{domain}.<ext>', or give it no locale at all"
    )
)]
pub struct SourceNotFoundError {
    /// The source locale.
    pub locale: String,
    /// The domain.
    pub domain: String,
}

/// Error when a catalog cannot be read or written.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to process catalog {}", path.display())]
#[diagnostic(code(translation_autofill::catalog::io))]
pub struct CatalogIoError {
    /// The catalog path.
    pub path: PathBuf,

    /// The underlying error.
    #[help]
    pub help: String,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    MissingApiKey(#[from] MissingApiKeyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    NoTargetLocales(#[from] NoTargetLocalesError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidLanguage(#[from] InvalidLanguageError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigNotFound(#[from] ConfigNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigParse(#[from] ConfigParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    NoCatalogFiles(#[from] NoCatalogFilesError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    FormatMismatch(#[from] FormatMismatchError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    TranslationFailed(#[from] TranslationFailedError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UsageUnavailable(#[from] UsageUnavailableError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    SourceNotFound(#[from] SourceNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    CatalogIo(#[from] CatalogIoError),

    #[error("IO error: {0}")]
    #[diagnostic(code(translation_autofill::io))]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(translation_autofill::other))]
    Other(String),
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(format!("{err:#}"))
    }
}

impl CliError {
    /// Wrap a catalog load or write failure with the path involved.
    pub fn catalog(path: impl Into<PathBuf>, err: autofill_catalog::CatalogError) -> Self {
        CliError::CatalogIo(CatalogIoError {
            path: path.into(),
            help: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_code_is_forwarded() {
        let err = CliError::from(MissingApiKeyError);
        let code = err.code().map(|c| c.to_string());
        assert_eq!(
            code.as_deref(),
            Some("translation_autofill::config::missing_api_key")
        );
    }

    #[test]
    fn test_anyhow_keeps_context_chain() {
        let err = anyhow::anyhow!("inner").context("outer");
        let cli: CliError = err.into();
        assert_eq!(cli.to_string(), "outer: inner");
    }

    #[test]
    fn test_source_not_found_help_mentions_conventions() {
        let err = SourceNotFoundError {
            locale: "en".to_string(),
            domain: "messages".to_string(),
        };
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("messages.en.<ext>"));
        assert!(help.contains("en.messages.<ext>"));
    }
}
