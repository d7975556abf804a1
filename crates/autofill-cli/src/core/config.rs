use crate::commands::AutofillArgs;
use crate::core::{
    CliError, ConfigNotFoundError, ConfigParseError, InvalidLanguageError, MissingApiKeyError,
    NoTargetLocalesError,
};
use crate::utils::ui;
use autofill_catalog::CatalogFormat;
use autofill_toml::{AutofillConfigError, AutofillToml, canonical_locale};
use miette::NamedSource;
use std::path::{Path, PathBuf};

/// Environment variable holding the DeepL API key.
pub const API_KEY_ENV: &str = "DEEPL_API_KEY";
/// Environment variable overriding the DeepL endpoint.
pub const API_URL_ENV: &str = "DEEPL_API_URL";

pub const DEFAULT_PATH: &str = "translations/";
pub const DEFAULT_SOURCE_LOCALE: &str = "en";
pub const DEFAULT_DOMAIN: &str = "messages";

/// Fully resolved settings of one `autofill` run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AutofillConfig {
    pub path: PathBuf,
    pub source_locale: String,
    pub target_locales: Vec<String>,
    pub api_key: String,
    pub api_url: Option<String>,
    pub format: CatalogFormat,
    pub domain: String,
    pub dry_run: bool,
    pub force: bool,
    pub mark_auto_translated: bool,
    pub verbose: bool,
}

impl AutofillConfig {
    /// Merge command-line arguments, `autofill.toml`, and the environment.
    ///
    /// Relative paths are taken from `cwd`, which is also where `autofill.toml` is looked up.
    pub fn resolve(args: &AutofillArgs, verbose: bool, cwd: &Path) -> Result<Self, CliError> {
        let file = load_config_file(args.config.as_deref(), cwd)?.unwrap_or_default();

        let api_key = args
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or(MissingApiKeyError)?;

        let requested_targets = if args.target_locales.is_empty() {
            file.target_locales.clone().unwrap_or_default()
        } else {
            args.target_locales.clone()
        };
        if requested_targets.is_empty() {
            return Err(NoTargetLocalesError.into());
        }

        let source_locale = validate_locale(
            args.source_locale
                .as_deref()
                .or(file.source_locale.as_deref())
                .unwrap_or(DEFAULT_SOURCE_LOCALE),
        )?;

        let mut target_locales: Vec<String> = Vec::with_capacity(requested_targets.len());
        for raw in &requested_targets {
            let locale = validate_locale(raw)?;
            if locale == source_locale {
                ui::print_target_is_source(&locale);
                continue;
            }
            if !target_locales.contains(&locale) {
                target_locales.push(locale);
            }
        }
        if target_locales.is_empty() {
            return Err(NoTargetLocalesError.into());
        }

        let path = args
            .path
            .clone()
            .or(file.path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PATH));

        let api_url = args
            .api_url
            .clone()
            .or(file.api_url)
            .or_else(|| std::env::var(API_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty());

        let config = AutofillConfig {
            path: cwd.join(path),
            source_locale,
            target_locales,
            api_key,
            api_url,
            format: args.format.or(file.format).unwrap_or_default(),
            domain: args
                .domain
                .clone()
                .or(file.domain)
                .unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            dry_run: args.dry_run,
            force: args.force,
            mark_auto_translated: !args.no_mark_auto_translated
                && file.mark_auto_translated.unwrap_or(true),
            verbose,
        };
        tracing::debug!(
            path = %config.path.display(),
            targets = ?config.target_locales,
            format = %config.format,
            "resolved configuration"
        );

        Ok(config)
    }
}

fn load_config_file(explicit: Option<&Path>, cwd: &Path) -> Result<Option<AutofillToml>, CliError> {
    match explicit {
        Some(path) => {
            let path = cwd.join(path);
            AutofillToml::read_from_path(&path)
                .map(Some)
                .map_err(|err| config_error(&path, err))
        },
        None => {
            let path = cwd.join(autofill_toml::CONFIG_FILE_NAME);
            AutofillToml::discover(cwd).map_err(|err| config_error(&path, err))
        },
    }
}

fn config_error(path: &Path, err: AutofillConfigError) -> CliError {
    match err {
        AutofillConfigError::NotFound { path } => ConfigNotFoundError { path }.into(),
        AutofillConfigError::ReadError(e) => CliError::Io(e),
        AutofillConfigError::ParseError(e) => {
            let content = fs_err::read_to_string(path).unwrap_or_default();
            ConfigParseError {
                src: NamedSource::new(path.display().to_string(), content),
                span: e.span().map(Into::into),
                help: e.message().to_string(),
            }
            .into()
        },
        AutofillConfigError::InvalidLanguageIdentifier { name, .. }
        | AutofillConfigError::UnsupportedLanguageIdentifier { name, .. } => {
            InvalidLanguageError { identifier: name }.into()
        },
    }
}

fn validate_locale(name: &str) -> Result<String, CliError> {
    canonical_locale(name).map_err(|_| {
        InvalidLanguageError {
            identifier: name.to_string(),
        }
        .into()
    })
}
