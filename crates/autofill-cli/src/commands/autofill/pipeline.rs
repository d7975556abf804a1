use super::diff::{DiffResult, diff_catalogs, find_source_file, find_target_path, load_catalog};
use super::merge::{AutoTranslationMarker, apply_translations, prepare_target};
use super::translate::{TranslationBatcher, translatable_texts};
use crate::core::{AutofillConfig, CliError, SourceNotFoundError, TranslationFailedError};
use crate::provider::TranslationProvider;
use crate::utils::{Confirm, discover_catalog_files, ui};
use autofill_catalog::{CatalogFile, Destination, DumpOptions};
use std::path::PathBuf;

const CONFIRM_QUESTION: &str = "Translation files will be modified. Continue?";

/// How a run ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// No target locale was missing anything.
    Complete,
    /// Dry run; `missing` keys would have been translated.
    DryRun { missing: usize },
    /// The user declined the confirmation.
    Cancelled,
    /// Catalogs were translated and written.
    Translated(Report),
}

/// Totals of a run that wrote catalogs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    /// Keys that received a translation.
    pub translated_keys: usize,
    /// Locales that received at least one translation.
    pub locales: Vec<String>,
    /// Catalog files written, in processing order.
    pub written: Vec<PathBuf>,
}

/// Sequences discovery, diff, confirmation, translation, merge and persistence.
pub struct Pipeline<'a, P: TranslationProvider + ?Sized, C: Confirm + ?Sized> {
    config: &'a AutofillConfig,
    provider: &'a P,
    confirm: &'a mut C,
}

impl<'a, P: TranslationProvider + ?Sized, C: Confirm + ?Sized> Pipeline<'a, P, C> {
    pub fn new(config: &'a AutofillConfig, provider: &'a P, confirm: &'a mut C) -> Self {
        Self {
            config,
            provider,
            confirm,
        }
    }

    pub fn run(&mut self) -> Result<Outcome, CliError> {
        let config = self.config;

        ui::print_header();
        if config.dry_run {
            ui::print_dry_run_notice();
        }

        ui::print_scanning();
        let files = discover_catalog_files(&config.path, config.format)?;
        ui::print_found_files(files.len());

        ui::print_validating();
        let diff = diff_catalogs(
            &files,
            config.format,
            &config.source_locale,
            &config.target_locales,
            &config.domain,
        )?;

        if diff.is_complete() {
            ui::print_all_complete();
            return Ok(Outcome::Complete);
        }
        ui::print_found_missing(diff.total());

        if config.dry_run {
            for (locale, keys) in diff.iter().filter(|(_, keys)| !keys.is_empty()) {
                ui::print_would_translate(locale, keys);
            }
            return Ok(Outcome::DryRun {
                missing: diff.total(),
            });
        }

        if !config.force && !self.confirm.confirm(CONFIRM_QUESTION)? {
            ui::print_cancelled();
            return Ok(Outcome::Cancelled);
        }

        let report = self.translate_all(&files, &diff)?;

        ui::print_report(report.translated_keys, report.locales.len());
        match self.provider.usage() {
            Ok(usage) => ui::print_usage(&usage),
            Err(err) => tracing::debug!("ignoring usage lookup failure: {err}"),
        }

        Ok(Outcome::Translated(report))
    }

    /// Translate and persist locales one after the other, stopping at the first failure.
    fn translate_all(&self, files: &[CatalogFile], diff: &DiffResult) -> Result<Report, CliError> {
        let config = self.config;
        let source_file = find_source_file(files, &config.source_locale, &config.domain);
        let mut report = Report::default();
        if config.mark_auto_translated && !config.format.keeps_metadata() {
            tracing::info!("{} catalogs cannot store auto-translation markers", config.format);
        }

        for (locale, missing) in diff.iter().filter(|(_, keys)| !keys.is_empty()) {
            ui::print_translating(locale);

            let (Some(source_file), Some(target_path)) = (
                source_file,
                find_target_path(files, locale, &config.domain, source_file),
            ) else {
                return Err(SourceNotFoundError {
                    locale: config.source_locale.clone(),
                    domain: config.domain.clone(),
                }
                .into());
            };
            tracing::info!(
                "{locale}: {} -> {}",
                source_file.path().display(),
                target_path.display()
            );

            let source = load_catalog(
                config.format,
                source_file.path(),
                &config.source_locale,
                &config.domain,
            )?;
            let target = load_catalog(config.format, &target_path, locale, &config.domain)?;
            let prepared = prepare_target(&source, target);

            let texts = translatable_texts(&source, missing);
            let merged = if texts.is_empty() {
                ui::print_nothing_to_translate(locale);
                prepared
            } else {
                let translations = self.translate_locale(&texts, locale)?;

                if config.verbose {
                    for (key, translation) in &translations {
                        ui::print_translated_key(key, &texts[key], translation);
                    }
                }

                let marker = config.mark_auto_translated.then(|| {
                    AutoTranslationMarker::new(self.provider.name(), &config.source_locale, locale)
                });
                report.translated_keys += translations.len();
                report.locales.push(locale.to_string());
                apply_translations(prepared, &translations, marker.as_ref())
            };

            let options = DumpOptions {
                default_locale: Some(config.source_locale.clone()),
                target_extension: None,
            };
            let written = config
                .format
                .write(&merged, &options, &Destination::File(target_path.clone()))
                .map_err(|err| CliError::catalog(&target_path, err))?;
            ui::print_saved(&written);
            report.written.push(written);
        }

        Ok(report)
    }

    fn translate_locale(
        &self,
        texts: &indexmap::IndexMap<String, String>,
        locale: &str,
    ) -> Result<indexmap::IndexMap<String, String>, CliError> {
        let pb = ui::create_progress_bar(texts.len() as u64, "Translating");
        let result = TranslationBatcher::new(self.provider).translate_with_progress(
            texts,
            &self.config.source_locale,
            locale,
            |done| pb.inc(done as u64),
        );
        pb.finish_and_clear();

        result.map_err(|err| {
            TranslationFailedError {
                locale: locale.to_string(),
                help: format!("{} error: {err}", self.provider.name()),
            }
            .into()
        })
    }
}
