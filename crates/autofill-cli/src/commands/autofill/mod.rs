//! The `autofill` command: fill missing catalog entries with machine translations.
//!
//! Discovery and diffing decide which keys each target locale lacks; only those
//! are sent to the provider, in batches, and merged back into the target catalog
//! without disturbing entries it already had.

mod diff;
mod merge;
mod pipeline;
mod translate;

pub use diff::{DiffResult, diff_catalogs, find_source_file, find_target_path, load_catalog};
pub use merge::{
    AutoTranslationMarker, PROVENANCE_TAG, REVIEW_STATE, apply_translations, prepare_target,
};
pub use pipeline::{Outcome, Pipeline, Report};
pub use translate::{BATCH_SIZE, TranslationBatcher, translatable_texts};

use crate::core::{AutofillConfig, CliError};
use crate::provider::DeepLProvider;
use crate::utils::StdinPrompt;
use autofill_catalog::CatalogFormat;
use clap::Parser;
use std::path::PathBuf;

/// Arguments for the autofill command.
#[derive(Debug, Default, Parser)]
pub struct AutofillArgs {
    /// Translation file or directory [default: translations/]
    pub path: Option<PathBuf>,

    /// Locale of the source catalog [default: en]
    #[arg(short, long)]
    pub source_locale: Option<String>,

    /// Locale(s) to fill in (repeatable or comma-separated).
    #[arg(short, long, value_delimiter = ',')]
    pub target_locales: Vec<String>,

    /// DeepL API key (or set DEEPL_API_KEY).
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// DeepL API base URL (or set DEEPL_API_URL).
    #[arg(long)]
    pub api_url: Option<String>,

    /// Catalog format: xliff, yaml, json or php [default: xliff]
    #[arg(short, long)]
    pub format: Option<CatalogFormat>,

    /// Translation domain [default: messages]
    #[arg(long)]
    pub domain: Option<String>,

    /// Dry run - show what would be translated without making changes.
    #[arg(short, long)]
    pub dry_run: bool,

    /// Write files without asking for confirmation.
    #[arg(long)]
    pub force: bool,

    /// Do not flag written entries for review.
    #[arg(long)]
    pub no_mark_auto_translated: bool,

    /// Path to an autofill.toml [default: ./autofill.toml when present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the autofill command.
pub fn run_autofill(args: AutofillArgs, verbose: bool) -> Result<(), CliError> {
    let cwd = std::env::current_dir()?;
    let config = AutofillConfig::resolve(&args, verbose, &cwd)?;
    let provider = DeepLProvider::new(config.api_key.clone(), config.api_url.clone());
    let mut prompt = StdinPrompt;

    Pipeline::new(&config, &provider, &mut prompt).run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = AutofillArgs::try_parse_from([
            "autofill",
            "i18n",
            "-t",
            "de,fr",
            "-t",
            "it",
            "-f",
            "yml",
            "-d",
            "--no-mark-auto-translated",
        ])
        .unwrap();

        assert_eq!(args.path, Some(PathBuf::from("i18n")));
        assert_eq!(args.target_locales, vec!["de", "fr", "it"]);
        assert_eq!(args.format, Some(CatalogFormat::Yaml));
        assert!(args.dry_run);
        assert!(args.no_mark_auto_translated);
        assert!(!args.force);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = AutofillArgs::try_parse_from(["autofill", "-f", "po"]);
        assert!(result.is_err());
    }
}
