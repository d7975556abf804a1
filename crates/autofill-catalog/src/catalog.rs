use indexmap::IndexMap;

/// A free-form annotation attached to a catalog entry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Note {
    /// The note text.
    pub content: String,
    /// Who wrote the note (XLIFF `note/@from`).
    pub from: Option<String>,
}

impl Note {
    pub fn new(content: impl Into<String>, from: Option<String>) -> Self {
        Self {
            content: content.into(),
            from,
        }
    }
}

/// Provenance carried alongside a catalog entry.
///
/// Only XLIFF can persist it; the other formats drop it on dump.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EntryMetadata {
    /// The original entry identifier (XLIFF `trans-unit/@id`).
    pub id: Option<String>,
    /// Attributes carried on the translated value (XLIFF `target/@*`).
    pub target_attributes: IndexMap<String, String>,
    /// Annotation notes, in document order.
    pub notes: Vec<Note>,
}

impl EntryMetadata {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.target_attributes.is_empty() && self.notes.is_empty()
    }
}

/// The entries of one locale and domain, in document order.
///
/// Keys are unique; each key carries at most one [`EntryMetadata`] record.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Catalog {
    locale: String,
    domain: String,
    entries: IndexMap<String, String>,
    metadata: IndexMap<String, EntryMetadata>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new(locale: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            domain: domain.into(),
            entries: IndexMap::new(),
            metadata: IndexMap::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(key, text)` pairs in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the key exists with a non-empty text.
    pub fn is_translated(&self, key: &str) -> bool {
        self.get(key).is_some_and(|text| !text.is_empty())
    }

    /// Set the text of a key. Existing keys keep their position; new keys are appended.
    pub fn set(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn metadata(&self, key: &str) -> Option<&EntryMetadata> {
        self.metadata.get(key)
    }

    /// Mutable metadata for a key, creating an empty record on first access.
    pub fn metadata_mut(&mut self, key: &str) -> &mut EntryMetadata {
        self.metadata.entry(key.to_string()).or_default()
    }

    /// Replace the metadata of a key. Empty records are dropped.
    pub fn set_metadata(&mut self, key: impl Into<String>, metadata: EntryMetadata) {
        let key = key.into();
        if metadata.is_empty() {
            self.metadata.shift_remove(&key);
        } else {
            self.metadata.insert(key, metadata);
        }
    }
}
