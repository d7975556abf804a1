use autofill_catalog::{Catalog, EntryMetadata, Note};
use indexmap::IndexMap;

/// `note/@from` of notes written by this tool.
pub const PROVENANCE_TAG: &str = "translation-autofill";
/// Review state given to machine-translated entries.
pub const REVIEW_STATE: &str = "needs-review-translation";

/// Annotation recording that an entry was machine-translated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AutoTranslationMarker {
    provider: String,
    source_locale: String,
    target_locale: String,
}

impl AutoTranslationMarker {
    pub fn new(
        provider: impl Into<String>,
        source_locale: impl Into<String>,
        target_locale: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            source_locale: source_locale.into(),
            target_locale: target_locale.into(),
        }
    }

    pub fn note(&self) -> Note {
        Note::new(
            format!(
                "Auto-translated by {} ({} → {})",
                self.provider, self.source_locale, self.target_locale
            ),
            Some(PROVENANCE_TAG.to_string()),
        )
    }

    /// Flag the entry for review. Other attributes and foreign notes are kept;
    /// an earlier note of this tool is replaced.
    fn apply(&self, metadata: &mut EntryMetadata) {
        metadata
            .target_attributes
            .insert("state".to_string(), REVIEW_STATE.to_string());
        metadata
            .notes
            .retain(|note| note.from.as_deref() != Some(PROVENANCE_TAG));
        metadata.notes.push(self.note());
    }
}

/// Give `target` every key of `source`, adding absent ones as empty placeholders.
///
/// Source entry ids are copied only onto target entries that have none.
pub fn prepare_target(source: &Catalog, mut target: Catalog) -> Catalog {
    for key in source.keys() {
        if !target.contains(key) {
            target.set(key, "");
        }

        let source_id = source.metadata(key).and_then(|meta| meta.id.as_deref());
        let target_has_id = target.metadata(key).is_some_and(|meta| meta.id.is_some());
        if let Some(id) = source_id
            && !target_has_id
        {
            target.metadata_mut(key).id = Some(id.to_string());
        }
    }
    target
}

/// Write `translations` into `target`, marking exactly those entries when a marker is given.
pub fn apply_translations(
    mut target: Catalog,
    translations: &IndexMap<String, String>,
    marker: Option<&AutoTranslationMarker>,
) -> Catalog {
    for (key, text) in translations {
        target.set(key.as_str(), text.as_str());
        if let Some(marker) = marker {
            marker.apply(target.metadata_mut(key));
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(locale: &str, entries: &[(&str, &str)]) -> Catalog {
        let mut catalog = Catalog::new(locale, "messages");
        for (key, text) in entries {
            catalog.set(*key, *text);
        }
        catalog
    }

    fn with_id(catalog: &mut Catalog, key: &str, id: &str) {
        catalog.metadata_mut(key).id = Some(id.to_string());
    }

    #[test]
    fn test_prepare_adds_missing_keys_as_placeholders() {
        let source = catalog("en", &[("a", "A"), ("b", "B"), ("c", "C")]);
        let target = catalog("de", &[("b", "Bee")]);

        let prepared = prepare_target(&source, target);
        let entries: Vec<_> = prepared.entries().collect();
        assert_eq!(entries, vec![("b", "Bee"), ("a", ""), ("c", "")]);
    }

    #[test]
    fn test_prepare_never_overwrites_target_id() {
        let mut source = catalog("en", &[("a", "A"), ("b", "B")]);
        with_id(&mut source, "a", "src-a");
        with_id(&mut source, "b", "src-b");
        let mut target = catalog("de", &[("a", "Ah")]);
        with_id(&mut target, "a", "hand-edited");

        let prepared = prepare_target(&source, target);
        assert_eq!(
            prepared.metadata("a").and_then(|m| m.id.as_deref()),
            Some("hand-edited")
        );
        assert_eq!(
            prepared.metadata("b").and_then(|m| m.id.as_deref()),
            Some("src-b")
        );
    }

    #[test]
    fn test_prepare_without_source_ids_adds_no_metadata() {
        let source = catalog("en", &[("a", "A")]);
        let prepared = prepare_target(&source, Catalog::new("de", "messages"));
        assert!(prepared.metadata("a").is_none());
    }

    #[test]
    fn test_marking_touches_only_translated_keys() {
        let mut target = catalog("de", &[("kept", "Behalten"), ("new", "")]);
        target.metadata_mut("kept").notes.push(Note::new("by hand", None));
        let before = target.metadata("kept").cloned();

        let translations: IndexMap<String, String> =
            [("new".to_string(), "Neu".to_string())].into_iter().collect();
        let marker = AutoTranslationMarker::new("DeepL", "en", "de");
        let merged = apply_translations(target, &translations, Some(&marker));

        assert_eq!(merged.get("new"), Some("Neu"));
        assert_eq!(merged.metadata("kept").cloned(), before);

        let meta = merged.metadata("new").unwrap();
        assert_eq!(
            meta.target_attributes.get("state").map(String::as_str),
            Some(REVIEW_STATE)
        );
        assert_eq!(meta.notes.len(), 1);
        assert_eq!(meta.notes[0].content, "Auto-translated by DeepL (en → de)");
        assert_eq!(meta.notes[0].from.as_deref(), Some(PROVENANCE_TAG));
    }

    #[test]
    fn test_marking_merges_existing_metadata() {
        let mut target = catalog("de", &[("a", "")]);
        {
            let meta = target.metadata_mut("a");
            meta.id = Some("42".to_string());
            meta.target_attributes
                .insert("approved".to_string(), "no".to_string());
            meta.notes.push(Note::new("context", Some("developer".to_string())));
            meta.notes.push(Note::new("old run", Some(PROVENANCE_TAG.to_string())));
        }

        let translations: IndexMap<String, String> =
            [("a".to_string(), "A".to_string())].into_iter().collect();
        let marker = AutoTranslationMarker::new("DeepL", "en", "de");
        let merged = apply_translations(target, &translations, Some(&marker));

        let meta = merged.metadata("a").unwrap();
        assert_eq!(meta.id.as_deref(), Some("42"));
        assert_eq!(
            meta.target_attributes.get("approved").map(String::as_str),
            Some("no")
        );
        assert_eq!(
            meta.target_attributes.get("state").map(String::as_str),
            Some(REVIEW_STATE)
        );
        let froms: Vec<_> = meta.notes.iter().map(|n| n.from.as_deref()).collect();
        assert_eq!(froms, vec![Some("developer"), Some(PROVENANCE_TAG)]);
    }

    #[test]
    fn test_apply_without_marker_leaves_metadata_alone() {
        let target = catalog("de", &[("a", "")]);
        let translations: IndexMap<String, String> =
            [("a".to_string(), "A".to_string())].into_iter().collect();

        let merged = apply_translations(target, &translations, None);
        assert_eq!(merged.get("a"), Some("A"));
        assert!(merged.metadata("a").is_none());
    }
}
