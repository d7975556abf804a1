//! File naming conventions for per-locale catalogs.
//!
//! A locale token is a two-letter lowercase language, optionally followed by a
//! script and a region (`de`, `pt-BR`, `zh_Hans`, `es-419`). Three shapes are
//! recognised, checked in this order:
//!
//! 1. `<domain>.<locale>.<ext>` (`messages.de.xlf`, `locallang.pt-BR.xlf`)
//! 2. `<locale>.<rest>` (`de.locallang.xlf`)
//! 3. no locale token at all (`locallang.xlf`): the implicit source file

use std::path::{Path, PathBuf};

/// How locale and domain tokens are arranged in a catalog file name.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NamingConvention {
    /// `messages.de.xlf`
    DomainLocale,
    /// `de.locallang.xlf`
    LocaleDomain,
    /// `locallang.xlf`
    Unlocalized,
}

impl NamingConvention {
    /// Detect the convention of a file name.
    pub fn detect(path: &Path) -> Self {
        let name = file_name(path);
        if split_domain_locale(name).is_some() {
            NamingConvention::DomainLocale
        } else if split_locale_domain(name).is_some() {
            NamingConvention::LocaleDomain
        } else {
            NamingConvention::Unlocalized
        }
    }
}

/// Whether a token looks like a locale: `ll`, `ll-Ssss`, `ll-RR`, `ll-999` or
/// `ll-Ssss-RR`, with `-` or `_` between subtags.
pub fn is_locale_token(token: &str) -> bool {
    let mut subtags = token.split(['-', '_']);
    let Some(language) = subtags.next() else {
        return false;
    };
    if !(language.len() == 2 && language.bytes().all(|b| b.is_ascii_lowercase())) {
        return false;
    }

    let mut rest: Vec<&str> = subtags.collect();
    if rest.first().is_some_and(|s| is_script(s)) {
        rest.remove(0);
    }
    match rest.as_slice() {
        [] => true,
        [region] => is_region(region),
        _ => false,
    }
}

fn is_script(subtag: &str) -> bool {
    let bytes = subtag.as_bytes();
    bytes.len() == 4
        && bytes[0].is_ascii_uppercase()
        && bytes[1..].iter().all(u8::is_ascii_lowercase)
}

fn is_region(subtag: &str) -> bool {
    (subtag.len() == 2 && subtag.bytes().all(|b| b.is_ascii_uppercase()))
        || (subtag.len() == 3 && subtag.bytes().all(|b| b.is_ascii_digit()))
}

/// Extract the locale token from a catalog file name.
///
/// Follows the same shapes as [`NamingConvention::detect`], so `en.de.xlf` is `de`.
pub fn extract_locale(path: &Path) -> Option<&str> {
    let name = file_name(path);
    split_domain_locale(name)
        .map(|(_, locale, _)| locale)
        .or_else(|| split_locale_domain(name).map(|(locale, _)| locale))
}

/// Whether the file name carries both the domain and the locale, in either order.
///
/// `pt-BR` also matches a file spelled `pt_BR`.
pub fn matches_locale_and_domain(path: &Path, locale: &str, domain: &str) -> bool {
    let name = file_name(path);
    let underscored = locale.replace('-', "_");
    [locale, underscored.as_str()].into_iter().any(|locale| {
        name.contains(&format!("{domain}.{locale}.")) || name.contains(&format!("{locale}.{domain}."))
    })
}

/// Infer the domain token of a catalog file name.
pub fn infer_domain(path: &Path) -> &str {
    let name = file_name(path);
    if let Some((domain, _, _)) = split_domain_locale(name) {
        return domain;
    }
    if let Some((_, rest)) = split_locale_domain(name) {
        return rest.rsplit_once('.').map_or(rest, |(domain, _)| domain);
    }
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

/// Build the path a catalog for `target_locale` should have, following the
/// convention of `source`.
///
/// Unlocalized sources get the locale inserted before the extension.
pub fn synthesize_target_path(source: &Path, target_locale: &str) -> PathBuf {
    let name = file_name(source);
    let target_name = match NamingConvention::detect(source) {
        NamingConvention::DomainLocale => {
            let (domain, _, ext) = split_domain_locale(name).unwrap_or((name, "", ""));
            format!("{domain}.{target_locale}.{ext}")
        },
        NamingConvention::LocaleDomain => {
            let (_, rest) = split_locale_domain(name).unwrap_or(("", name));
            format!("{target_locale}.{rest}")
        },
        NamingConvention::Unlocalized => match name.rsplit_once('.') {
            Some((stem, ext)) => format!("{stem}.{target_locale}.{ext}"),
            None => format!("{name}.{target_locale}"),
        },
    };

    source
        .parent()
        .map_or_else(|| PathBuf::from(&target_name), |dir| dir.join(&target_name))
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
}

/// `<domain>.<locale>.<ext>` where the locale is the second-to-last token.
fn split_domain_locale(name: &str) -> Option<(&str, &str, &str)> {
    let (head, ext) = name.rsplit_once('.')?;
    let (domain, locale) = head.rsplit_once('.')?;
    (!domain.is_empty() && is_locale_token(locale) && !ext.is_empty())
        .then_some((domain, locale, ext))
}

/// `<locale>.<rest>` with a non-empty rest.
fn split_locale_domain(name: &str) -> Option<(&str, &str)> {
    let (locale, rest) = name.split_once('.')?;
    (is_locale_token(locale) && !rest.is_empty()).then_some((locale, rest))
}
