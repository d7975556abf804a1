use crate::core::CliError;
use autofill_catalog::{
    Catalog, CatalogFile, CatalogFormat, matches_locale_and_domain, synthesize_target_path,
};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Keys each target locale lacks, in source order, with locales in request order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DiffResult {
    missing: IndexMap<String, Vec<String>>,
}

impl DiffResult {
    /// Missing keys of a locale; empty when the locale is complete or unknown.
    pub fn missing(&self, locale: &str) -> &[String] {
        self.missing
            .get(locale)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `(locale, missing keys)` pairs, including complete locales.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.missing
            .iter()
            .map(|(locale, keys)| (locale.as_str(), keys.as_slice()))
    }

    /// Total number of missing keys across all locales.
    pub fn total(&self) -> usize {
        self.missing.values().map(Vec::len).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.total() == 0
    }
}

/// The source catalog file: the first one named after the locale and domain,
/// else the one without a locale in its name for that domain.
///
/// A lone unlocalized file is the source whatever its domain, so a single
/// `locallang.xlf` works without `--domain`.
pub fn find_source_file<'a>(
    files: &'a [CatalogFile],
    source_locale: &str,
    domain: &str,
) -> Option<&'a CatalogFile> {
    if let Some(file) = files
        .iter()
        .find(|file| matches_locale_and_domain(file.path(), source_locale, domain))
    {
        return Some(file);
    }

    let mut unlocalized = files.iter().filter(|file| file.locale().is_none());
    if let Some(file) = unlocalized.clone().find(|file| file.domain() == domain) {
        return Some(file);
    }
    match (unlocalized.next(), unlocalized.next()) {
        (Some(file), None) => Some(file),
        _ => None,
    }
}

/// Where the catalog of `target_locale` lives, or would live next to `source`.
///
/// `None` when no file exists for the locale and there is no source to derive a name from.
pub fn find_target_path(
    files: &[CatalogFile],
    target_locale: &str,
    domain: &str,
    source: Option<&CatalogFile>,
) -> Option<PathBuf> {
    files
        .iter()
        .find(|file| matches_locale_and_domain(file.path(), target_locale, domain))
        .map(|file| file.path().to_path_buf())
        .or_else(|| source.map(|file| synthesize_target_path(file.path(), target_locale)))
}

/// Load a catalog, wrapping failures with the offending path.
pub fn load_catalog(
    format: CatalogFormat,
    path: &Path,
    locale: &str,
    domain: &str,
) -> Result<Catalog, CliError> {
    format
        .load(path, locale, domain)
        .map_err(|err| CliError::catalog(path, err))
}

/// Compute the missing keys of every target locale against the source catalog.
///
/// A key is missing when the target lacks it or holds an empty text. A target
/// without a catalog file misses every source key. Without a source file the
/// source catalog is empty and nothing is missing.
pub fn diff_catalogs(
    files: &[CatalogFile],
    format: CatalogFormat,
    source_locale: &str,
    target_locales: &[String],
    domain: &str,
) -> Result<DiffResult, CliError> {
    let source_file = find_source_file(files, source_locale, domain);
    let source = match source_file {
        Some(file) => load_catalog(format, file.path(), source_locale, domain)?,
        None => {
            tracing::warn!("no source file for locale {source_locale} and domain {domain}");
            Catalog::new(source_locale, domain)
        },
    };

    let mut missing = IndexMap::with_capacity(target_locales.len());
    for locale in target_locales {
        let keys: Vec<String> = match find_target_path(files, locale, domain, source_file) {
            Some(path) if path.exists() => {
                let target = load_catalog(format, &path, locale, domain)?;
                source
                    .keys()
                    .filter(|key| !target.is_translated(key))
                    .map(str::to_string)
                    .collect()
            },
            _ => source.keys().map(str::to_string).collect(),
        };
        tracing::info!("{locale}: {} missing key(s)", keys.len());
        missing.insert(locale.clone(), keys);
    }

    Ok(DiffResult { missing })
}
