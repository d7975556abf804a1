use crate::core::{API_KEY_ENV, API_URL_ENV, CliError, MissingApiKeyError, UsageUnavailableError};
use crate::provider::{DeepLProvider, TranslationProvider as _};
use crate::utils::ui;
use clap::Parser;

/// Arguments for the usage command.
#[derive(Debug, Parser)]
pub struct UsageArgs {
    /// DeepL API key (or set DEEPL_API_KEY).
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// DeepL API base URL (or set DEEPL_API_URL).
    #[arg(long)]
    pub api_url: Option<String>,
}

/// Run the usage command.
pub fn run_usage(args: UsageArgs) -> Result<(), CliError> {
    let api_key = args
        .api_key
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .filter(|key| !key.trim().is_empty())
        .ok_or(MissingApiKeyError)?;
    let api_url = args.api_url.or_else(|| std::env::var(API_URL_ENV).ok());

    let provider = DeepLProvider::new(api_key, api_url);
    let usage = provider.usage().map_err(|err| UsageUnavailableError {
        help: err.to_string(),
    })?;

    ui::print_usage(&usage);
    Ok(())
}
