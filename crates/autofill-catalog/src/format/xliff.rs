//! XLIFF 1.2 catalogs.
//!
//! The message key is `trans-unit/@resname` when present, otherwise the `<source>`
//! text. The value is the `<target>` text, falling back to `<source>` when a unit has
//! no target element. Unit ids, target attributes and notes are kept as metadata.

use super::{CatalogAdapter, DumpOptions};
use crate::{Catalog, CatalogError, EntryMetadata, Note};
use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

pub(super) struct XliffAdapter;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Field {
    Source,
    Target,
    Note,
}

/// A `trans-unit` being read.
#[derive(Debug, Default)]
struct PendingUnit {
    id: Option<String>,
    resname: Option<String>,
    source: Option<String>,
    target: Option<String>,
    target_attributes: IndexMap<String, String>,
    notes: Vec<Note>,
}

impl PendingUnit {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, CatalogError> {
        let mut unit = PendingUnit::default();
        for attr in start.attributes().flatten() {
            let value = attr.unescape_value()?.into_owned();
            match attr.key.local_name().as_ref() {
                b"id" => unit.id = Some(value),
                b"resname" => unit.resname = Some(value),
                _ => {},
            }
        }
        Ok(unit)
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Source => self.source.as_mut(),
            Field::Target => self.target.as_mut(),
            Field::Note => self.notes.last_mut().map(|note| &mut note.content),
        }
    }

    fn finish(self, catalog: &mut Catalog) {
        let key = match (self.resname, &self.source) {
            (Some(resname), _) if !resname.is_empty() => resname,
            (_, Some(source)) => source.clone(),
            _ => return,
        };
        if key.is_empty() {
            return;
        }

        let text = self.target.or(self.source).unwrap_or_default();
        catalog.set(key.clone(), text);
        catalog.set_metadata(
            key,
            EntryMetadata {
                id: self.id.filter(|id| !id.is_empty()),
                target_attributes: self.target_attributes,
                notes: self.notes,
            },
        );
    }
}

fn collect_attributes(start: &BytesStart<'_>) -> Result<IndexMap<String, String>, CatalogError> {
    let mut attributes = IndexMap::new();
    for attr in start.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        attributes.insert(key, attr.unescape_value()?.into_owned());
    }
    Ok(attributes)
}

fn note_from_start(start: &BytesStart<'_>) -> Result<Note, CatalogError> {
    let mut from = None;
    for attr in start.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"from" {
            from = Some(attr.unescape_value()?.into_owned());
        }
    }
    Ok(Note::new(String::new(), from))
}

impl CatalogAdapter for XliffAdapter {
    fn parse(&self, content: &str, locale: &str, domain: &str) -> Result<Catalog, CatalogError> {
        let mut reader = Reader::from_str(content);
        reader.trim_text(false);

        let mut catalog = Catalog::new(locale, domain);
        let mut unit: Option<PendingUnit> = None;
        let mut field: Option<Field> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => match e.local_name().as_ref() {
                    b"trans-unit" => unit = Some(PendingUnit::from_start(e)?),
                    b"source" => {
                        if let Some(unit) = unit.as_mut() {
                            unit.source = Some(String::new());
                            field = Some(Field::Source);
                        }
                    },
                    b"target" => {
                        if let Some(unit) = unit.as_mut() {
                            unit.target = Some(String::new());
                            unit.target_attributes = collect_attributes(e)?;
                            field = Some(Field::Target);
                        }
                    },
                    b"note" => {
                        if let Some(unit) = unit.as_mut() {
                            unit.notes.push(note_from_start(e)?);
                            field = Some(Field::Note);
                        }
                    },
                    _ => {},
                },
                Event::Empty(ref e) => {
                    if let Some(unit) = unit.as_mut() {
                        match e.local_name().as_ref() {
                            b"source" => unit.source = Some(String::new()),
                            b"target" => {
                                unit.target = Some(String::new());
                                unit.target_attributes = collect_attributes(e)?;
                            },
                            b"note" => unit.notes.push(note_from_start(e)?),
                            _ => {},
                        }
                    }
                },
                Event::Text(ref e) => {
                    if let (Some(unit), Some(field)) = (unit.as_mut(), field)
                        && let Some(text) = unit.text_mut(field)
                    {
                        text.push_str(&e.unescape()?);
                    }
                },
                Event::CData(ref e) => {
                    if let (Some(unit), Some(field)) = (unit.as_mut(), field)
                        && let Some(text) = unit.text_mut(field)
                    {
                        text.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                },
                Event::End(ref e) => match e.local_name().as_ref() {
                    b"source" | b"target" | b"note" => field = None,
                    b"trans-unit" => {
                        if let Some(finished) = unit.take() {
                            finished.finish(&mut catalog);
                        }
                        field = None;
                    },
                    _ => {},
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Ok(catalog)
    }

    fn dump(&self, catalog: &Catalog, options: &DumpOptions) -> Result<String, CatalogError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
        let source_language = options
            .default_locale
            .as_deref()
            .unwrap_or_else(|| catalog.locale());

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut xliff = BytesStart::new("xliff");
        xliff.push_attribute(("version", "1.2"));
        xliff.push_attribute(("xmlns", "urn:oasis:names:tc:xliff:document:1.2"));
        writer.write_event(Event::Start(xliff))?;

        let mut file = BytesStart::new("file");
        file.push_attribute(("source-language", source_language));
        file.push_attribute(("target-language", catalog.locale()));
        file.push_attribute(("datatype", "plaintext"));
        file.push_attribute(("original", "file.ext"));
        writer.write_event(Event::Start(file))?;
        writer.write_event(Event::Start(BytesStart::new("body")))?;

        for (key, text) in catalog.entries() {
            let metadata = catalog.metadata(key);
            let id = metadata.and_then(|m| m.id.as_deref()).unwrap_or(key);

            let mut unit = BytesStart::new("trans-unit");
            unit.push_attribute(("id", id));
            unit.push_attribute(("resname", key));
            writer.write_event(Event::Start(unit))?;

            // The key travels in resname; the source text is left empty.
            writer.write_event(Event::Empty(BytesStart::new("source")))?;

            let mut target = BytesStart::new("target");
            if let Some(metadata) = metadata {
                for (name, value) in &metadata.target_attributes {
                    target.push_attribute((name.as_str(), value.as_str()));
                }
            }
            if text.is_empty() {
                writer.write_event(Event::Empty(target))?;
            } else {
                writer.write_event(Event::Start(target))?;
                writer.write_event(Event::Text(BytesText::new(text)))?;
                writer.write_event(Event::End(BytesEnd::new("target")))?;
            }

            for note in metadata.map(|m| m.notes.as_slice()).unwrap_or_default() {
                let mut element = BytesStart::new("note");
                if let Some(from) = &note.from {
                    element.push_attribute(("from", from.as_str()));
                }
                writer.write_event(Event::Start(element))?;
                writer.write_event(Event::Text(BytesText::new(&note.content)))?;
                writer.write_event(Event::End(BytesEnd::new("note")))?;
            }

            writer.write_event(Event::End(BytesEnd::new("trans-unit")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("body")))?;
        writer.write_event(Event::End(BytesEnd::new("file")))?;
        writer.write_event(Event::End(BytesEnd::new("xliff")))?;

        let mut out = String::from_utf8(writer.into_inner())
            .map_err(|err| CatalogError::Xml(err.to_string()))?;
        out.push('\n');
        Ok(out)
    }
}
