use crate::provider::{ProviderError, TranslationProvider};
use autofill_catalog::Catalog;
use indexmap::IndexMap;

/// Most texts the provider accepts in one request.
pub const BATCH_SIZE: usize = 50;

/// Source texts worth sending for `keys`: blank texts and a bare `0` are skipped.
pub fn translatable_texts(source: &Catalog, keys: &[String]) -> IndexMap<String, String> {
    keys.iter()
        .filter_map(|key| {
            let text = source.get(key)?;
            let trimmed = text.trim();
            (!trimmed.is_empty() && trimmed != "0").then(|| (key.clone(), text.to_string()))
        })
        .collect()
}

/// Drives a [`TranslationProvider`] over fixed-size batches.
pub struct TranslationBatcher<'a, P: TranslationProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: TranslationProvider + ?Sized> TranslationBatcher<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Translate every text, keyed like the input.
    pub fn translate(
        &self,
        texts: &IndexMap<String, String>,
        source_locale: &str,
        target_locale: &str,
    ) -> Result<IndexMap<String, String>, ProviderError> {
        self.translate_with_progress(texts, source_locale, target_locale, |_| {})
    }

    /// Like [`translate`](Self::translate), calling `on_batch` with the size of each finished batch.
    ///
    /// The first failing batch aborts the call and nothing is returned for earlier batches.
    pub fn translate_with_progress(
        &self,
        texts: &IndexMap<String, String>,
        source_locale: &str,
        target_locale: &str,
        mut on_batch: impl FnMut(usize),
    ) -> Result<IndexMap<String, String>, ProviderError> {
        if texts.is_empty() {
            return Ok(IndexMap::new());
        }

        let entries: Vec<(&str, &str)> = texts
            .iter()
            .map(|(key, text)| (key.as_str(), text.as_str()))
            .collect();
        let batch_count = entries.len().div_ceil(BATCH_SIZE);
        let mut translated = IndexMap::with_capacity(entries.len());

        for (index, batch) in entries.chunks(BATCH_SIZE).enumerate() {
            let sources: Vec<&str> = batch.iter().map(|(_, text)| *text).collect();
            tracing::debug!(
                "{} batch {}/{} with {} text(s) for {target_locale}",
                self.provider.name(),
                index + 1,
                batch_count,
                sources.len()
            );

            let results = self
                .provider
                .translate_batch(&sources, source_locale, target_locale)?;
            if results.len() != batch.len() {
                return Err(ProviderError::LengthMismatch {
                    expected: batch.len(),
                    received: results.len(),
                });
            }

            for ((key, _), text) in batch.iter().zip(results) {
                translated.insert((*key).to_string(), text);
            }
            on_batch(batch.len());
        }

        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Usage;
    use std::cell::RefCell;

    /// Upper-cases texts and records the size of every request.
    #[derive(Default)]
    struct Recording {
        calls: RefCell<Vec<usize>>,
        fail_on_call: Option<usize>,
        short_by_one: bool,
    }

    impl TranslationProvider for Recording {
        fn name(&self) -> &str {
            "Recording"
        }

        fn translate_batch(
            &self,
            texts: &[&str],
            _source_locale: &str,
            _target_locale: &str,
        ) -> Result<Vec<String>, ProviderError> {
            let mut calls = self.calls.borrow_mut();
            calls.push(texts.len());
            if self.fail_on_call == Some(calls.len()) {
                return Err(ProviderError::Transport("connection reset".to_string()));
            }
            let mut out: Vec<String> = texts.iter().map(|t| t.to_uppercase()).collect();
            if self.short_by_one {
                out.pop();
            }
            Ok(out)
        }

        fn usage(&self) -> Result<Usage, ProviderError> {
            Ok(Usage::default())
        }
    }

    fn texts(count: usize) -> IndexMap<String, String> {
        (0..count)
            .map(|i| (format!("key.{i}"), format!("text {i}")))
            .collect()
    }

    #[test]
    fn test_empty_input_makes_no_calls() {
        let provider = Recording::default();
        let result = TranslationBatcher::new(&provider)
            .translate(&IndexMap::new(), "en", "de")
            .unwrap();
        assert!(result.is_empty());
        assert!(provider.calls.borrow().is_empty());
    }

    #[test]
    fn test_120_keys_make_three_batches() {
        let provider = Recording::default();
        let input = texts(120);
        let mut progress = Vec::new();

        let result = TranslationBatcher::new(&provider)
            .translate_with_progress(&input, "en", "de", |n| progress.push(n))
            .unwrap();

        assert_eq!(*provider.calls.borrow(), vec![50, 50, 20]);
        assert_eq!(progress, vec![50, 50, 20]);
        assert_eq!(result.len(), 120);
        for (i, (key, text)) in result.iter().enumerate() {
            assert_eq!(key, &format!("key.{i}"));
            assert_eq!(text, &format!("TEXT {i}"));
        }
    }

    #[test]
    fn test_failing_batch_discards_everything() {
        let provider = Recording {
            fail_on_call: Some(2),
            ..Default::default()
        };
        let result = TranslationBatcher::new(&provider).translate(&texts(120), "en", "de");

        assert!(matches!(result, Err(ProviderError::Transport(_))));
        assert_eq!(*provider.calls.borrow(), vec![50, 50]);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let provider = Recording {
            short_by_one: true,
            ..Default::default()
        };
        let result = TranslationBatcher::new(&provider).translate(&texts(3), "en", "de");
        assert!(matches!(
            result,
            Err(ProviderError::LengthMismatch {
                expected: 3,
                received: 2
            })
        ));
    }

    #[test]
    fn test_translatable_texts_skips_blank_and_zero() {
        let mut source = Catalog::new("en", "messages");
        source.set("title", "Title");
        source.set("blank", "   ");
        source.set("zero", " 0 ");
        source.set("padded", " Hi ");

        let keys: Vec<String> = ["title", "blank", "zero", "padded", "absent"]
            .iter()
            .map(|k| k.to_string())
            .collect();
        let texts = translatable_texts(&source, &keys);

        let pairs: Vec<_> = texts.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("title", "Title"), ("padded", " Hi ")]);
    }
}
