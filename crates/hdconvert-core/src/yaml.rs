//! YAML encoding of documents.
//!
//! YAML has no notion of attributes or of an ordered, repeatable set of child
//! tags, so a [`Record`] is written as a sequence of single-entry mappings:
//!
//! ```yaml
//! LANGUAGE:
//! - attributes:
//!     XMLID: LANGUAGES
//! - similar:
//!     one: [Foo]
//!     two: [Bar]
//! - NOTES: Some notes
//! - ADDER: []
//! ```
//!
//! The `attributes` entry is present whenever the record is not empty, and
//! the `similar` entry follows it for tags whose transform carries a
//! similarity table. Leaf text is a plain string and an empty record is `[]`.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Value as Yaml};
use tracing::debug;

use crate::{Degree, Document, Error, Record, Result, SimilarityTable, TransformTable, Value};

/// Key of the leading entry holding a record's attributes.
pub const ATTRIBUTES_KEY: &str = "attributes";

/// Key of the entry holding a `LANGUAGE` similarity table.
pub const SIMILAR_KEY: &str = "similar";

/// A mapping with exactly one entry.
struct Entry<'a, V: ?Sized>(&'a str, &'a V);

impl<V: Serialize + ?Sized> Serialize for Entry<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Entry(&self.tag, &self.root).serialize(serializer)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(text) => serializer.serialize_str(text),
            Value::Record(record) => record.serialize(serializer),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_empty() {
            return serializer.serialize_seq(Some(0))?.end();
        }

        let len = 1 + usize::from(self.similarity.is_some()) + self.children.len();
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&Entry(ATTRIBUTES_KEY, &self.attributes))?;
        if let Some(similarity) = &self.similarity {
            seq.serialize_element(&Entry(SIMILAR_KEY, similarity))?;
        }
        for (tag, child) in &self.children {
            seq.serialize_element(&Entry(tag, child))?;
        }
        seq.end()
    }
}

impl Serialize for SimilarityTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (degree, languages) in self.iter() {
            map.serialize_entry(degree.key(), languages)?;
        }
        map.end()
    }
}

/// Decodes YAML value trees into documents.
#[derive(Debug, Clone, Copy)]
pub struct YamlDecoder<'t> {
    transforms: &'t TransformTable,
}

impl<'t> YamlDecoder<'t> {
    pub fn new(transforms: &'t TransformTable) -> Self {
        Self { transforms }
    }

    /// Parse YAML text into a document.
    pub fn parse(&self, text: &str) -> Result<Document> {
        let yaml: Yaml = serde_yaml::from_str(text)?;
        self.document(&yaml)
    }

    /// Decode a parsed YAML tree of the shape `{ tag: value }`.
    pub fn document(&self, yaml: &Yaml) -> Result<Document> {
        let Yaml::Mapping(mapping) = yaml else {
            return Err(Error::MalformedDocument(format!(
                "expected a mapping with one root tag, found {}",
                describe(yaml)
            )));
        };
        let (tag, value) = single_entry(mapping).ok_or_else(|| {
            Error::MalformedDocument(format!(
                "expected exactly one root tag, found {} entries",
                mapping.len()
            ))
        })?;
        let tag = tag.ok_or_else(|| Error::MalformedDocument("root tag is not a string".into()))?;

        debug!(tag = %tag, "decoding YAML document");
        let root = self.value(&tag, value)?;
        Ok(Document::new(tag, root))
    }

    /// Decode the value of one element.
    pub fn value(&self, tag: &str, yaml: &Yaml) -> Result<Value> {
        match yaml {
            Yaml::Sequence(entries) => self.record(tag, entries).map(Value::Record),
            other => scalar_text(other).map(Value::Scalar).ok_or_else(|| {
                Error::malformed_value(
                    tag,
                    format!("expected text or a sequence, found {}", describe(other)),
                )
            }),
        }
    }

    fn record(&self, tag: &str, entries: &[Yaml]) -> Result<Record> {
        let carries_similarity = self.transforms.carries_similarity(tag);
        let mut entries = entries.iter();

        let Some(first) = entries.next() else {
            if carries_similarity {
                return Err(Error::MissingSimilarity { tag: tag.to_string() });
            }
            return Ok(Record::new());
        };

        let mut record = Record::new();
        match entry(first) {
            Some((Some(key), value)) if key == ATTRIBUTES_KEY => {
                record.attributes = attributes(tag, value)?;
            }
            _ => return Err(Error::MissingAttributes { tag: tag.to_string() }),
        }

        if carries_similarity {
            match entries.next().and_then(entry) {
                Some((Some(key), value)) if key == SIMILAR_KEY => {
                    record.similarity = Some(similarity(tag, value)?);
                }
                _ => return Err(Error::MissingSimilarity { tag: tag.to_string() }),
            }
        }

        for child in entries {
            let (child_tag, value) = entry(child).ok_or_else(|| {
                Error::malformed_value(
                    tag,
                    format!("expected a single-entry mapping, found {}", describe(child)),
                )
            })?;
            let child_tag = child_tag
                .ok_or_else(|| Error::malformed_value(tag, "child tag is not a string"))?;
            let value = self.value(&child_tag, value)?;
            record.children.push((child_tag, value));
        }

        Ok(record)
    }
}

/// Parse YAML text with the standard transform table.
pub fn from_str(text: &str) -> Result<Document> {
    YamlDecoder::new(&TransformTable::standard()).parse(text)
}

/// Write a document as YAML text, checked against the standard transform table.
pub fn to_string(document: &Document) -> Result<String> {
    to_string_with(&TransformTable::standard(), document)
}

/// Write a document as YAML text.
///
/// Fails instead of writing a `similar` entry that [`YamlDecoder`] would
/// reject, or omitting one it requires.
pub fn to_string_with(transforms: &TransformTable, document: &Document) -> Result<String> {
    check_similarity(transforms, &document.tag, &document.root)?;
    Ok(serde_yaml::to_string(document)?)
}

fn check_similarity(transforms: &TransformTable, tag: &str, value: &Value) -> Result<()> {
    let Value::Record(record) = value else {
        return Ok(());
    };

    match (transforms.carries_similarity(tag), &record.similarity) {
        (true, None) => return Err(Error::MissingSimilarity { tag: tag.to_string() }),
        (false, Some(_)) => {
            return Err(Error::malformed_similarity(
                tag,
                "similarity table on a tag that does not carry one",
            ))
        }
        _ => {}
    }

    record
        .children
        .iter()
        .try_for_each(|(child_tag, child)| check_similarity(transforms, child_tag, child))
}

/// Text of a scalar. Booleans become `true`/`false` and numbers their decimal
/// form, so `0x10` reads as `16` and `1e3` as `1000.0`.
fn scalar_text(yaml: &Yaml) -> Option<String> {
    match yaml {
        Yaml::String(text) => Some(text.clone()),
        Yaml::Number(number) => Some(number.to_string()),
        Yaml::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn describe(yaml: &Yaml) -> &'static str {
    match yaml {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a sequence",
        Yaml::Mapping(_) => "a mapping",
        Yaml::Tagged(_) => "a tagged value",
    }
}

/// The key and value of a single-entry mapping. The key is `None` when it is
/// not a scalar.
fn single_entry(mapping: &Mapping) -> Option<(Option<String>, &Yaml)> {
    let mut iter = mapping.iter();
    match (iter.next(), iter.next()) {
        (Some((key, value)), None) => Some((scalar_text(key), value)),
        _ => None,
    }
}

fn entry(yaml: &Yaml) -> Option<(Option<String>, &Yaml)> {
    match yaml {
        Yaml::Mapping(mapping) => single_entry(mapping),
        _ => None,
    }
}

fn attributes(tag: &str, yaml: &Yaml) -> Result<IndexMap<String, String>> {
    let mapping = match yaml {
        Yaml::Null => return Ok(IndexMap::new()),
        Yaml::Mapping(mapping) => mapping,
        other => {
            return Err(Error::malformed_value(
                tag,
                format!("attributes must be a mapping, found {}", describe(other)),
            ))
        }
    };

    mapping
        .iter()
        .map(|(key, value)| -> Result<(String, String)> {
            let key = scalar_text(key)
                .ok_or_else(|| Error::malformed_value(tag, "attribute key is not a string"))?;
            let value = scalar_text(value).ok_or_else(|| {
                Error::malformed_value(
                    tag,
                    format!("attribute {key} must be text, found {}", describe(value)),
                )
            })?;
            Ok((key, value))
        })
        .collect()
}

fn similarity(tag: &str, yaml: &Yaml) -> Result<SimilarityTable> {
    let mapping = match yaml {
        Yaml::Null => return Ok(SimilarityTable::new()),
        Yaml::Mapping(mapping) => mapping,
        other => {
            return Err(Error::malformed_similarity(
                tag,
                format!("expected a mapping, found {}", describe(other)),
            ))
        }
    };

    let mut table = SimilarityTable::new();
    for (key, languages) in mapping {
        let key = scalar_text(key).unwrap_or_default();
        let degree = Degree::from_key(&key).ok_or_else(|| {
            Error::malformed_similarity(
                tag,
                format!("unknown degree '{key}' (expected one, two, three or four)"),
            )
        })?;

        let languages = match languages {
            Yaml::Null => Vec::new(),
            Yaml::Sequence(items) => items
                .iter()
                .map(|item| {
                    scalar_text(item).ok_or_else(|| {
                        Error::malformed_similarity(
                            tag,
                            format!("{key} entries must be text, found {}", describe(item)),
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            other => {
                return Err(Error::malformed_similarity(
                    tag,
                    format!("{key} must be a list, found {}", describe(other)),
                ))
            }
        };
        table.insert(degree, languages);
    }

    Ok(table)
}
