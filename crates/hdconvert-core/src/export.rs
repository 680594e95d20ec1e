//! Document → element tree.

use hdconvert_hdt::Element;
use tracing::debug;

use crate::{Document, Error, Record, Result, TransformTable, Value};

/// Converts [`Value`] trees back into element trees.
///
/// HeroDesigner treats tags and attribute keys as upper case, so both are
/// upper-cased on the way out unless a transform says otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Exporter<'t> {
    transforms: &'t TransformTable,
}

impl<'t> Exporter<'t> {
    pub fn new(transforms: &'t TransformTable) -> Self {
        Self { transforms }
    }

    /// Export a tag-rooted document as its root element.
    pub fn export_document(&self, document: &Document) -> Result<Element> {
        debug!(tag = %document.tag, "exporting document");
        self.export(&document.tag, &document.root)
    }

    /// Export one value under the given tag.
    pub fn export(&self, tag: &str, value: &Value) -> Result<Element> {
        let tag = tag.to_uppercase();
        match value {
            Value::Scalar(text) => Ok(Element::new(tag).text(text.as_str())),
            Value::Record(record) => self.export_record(tag, record),
        }
    }

    fn export_record(&self, tag: String, record: &Record) -> Result<Element> {
        let transform = self.transforms.get(&tag);
        if record.similarity.is_some() && !transform.is_some_and(|t| t.carries_similarity()) {
            return Err(Error::malformed_similarity(
                &tag,
                "similarity table on a tag that does not carry one",
            ));
        }

        let mut element = Element::new(tag);

        for (key, value) in &record.attributes {
            let key = match transform {
                Some(transform) if transform.keeps_attribute_case(key) => key.clone(),
                _ => key.to_uppercase(),
            };
            element.attributes.insert(key, value.clone());
        }

        if let Some(transform) = transform {
            transform.emit_children(&element.tag, record, &mut element.children)?;
        }

        for (child_tag, child) in &record.children {
            element.children.push(self.export(child_tag, child)?);
        }

        Ok(element)
    }
}

/// Export a value with the standard transform table.
pub fn export(tag: &str, value: &Value) -> Result<Element> {
    Exporter::new(&TransformTable::standard()).export(tag, value)
}

/// Export a document with the standard transform table.
pub fn export_document(document: &Document) -> Result<Element> {
    Exporter::new(&TransformTable::standard()).export_document(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Degree, SimilarityTable};

    #[test]
    fn test_export_scalar() {
        let element = export("notes", &Value::scalar("Some notes")).unwrap();
        assert_eq!(element, Element::new("NOTES").text("Some notes"));
    }

    #[test]
    fn test_export_empty_record() {
        let element = export("X", &Value::Record(Record::new())).unwrap();
        assert_eq!(element.tag, "X");
        assert!(element.attributes.is_empty());
        assert!(element.children.is_empty());
        assert_eq!(element.text, None);
    }

    #[test]
    fn test_export_upper_cases_tags_and_keys() {
        let record = Record::new()
            .attr("b", "2")
            .attr("a", "1")
            .child("notes", Value::scalar("n"));

        let element = export("power", &Value::Record(record)).unwrap();
        assert_eq!(element.tag, "POWER");
        let keys: Vec<_> = element.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["B", "A"]);
        assert_eq!(element.children, [Element::new("NOTES").text("n")]);
    }

    #[test]
    fn test_export_template_keeps_reserved_keys() {
        let record = Record::new()
            .attr("version", "6.0")
            .attr("extends", "builtIn.Heroic.hdt")
            .attr("name", "Custom");

        let element = export("template", &Value::Record(record)).unwrap();
        assert_eq!(element.tag, "TEMPLATE");
        let keys: Vec<_> = element.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["version", "extends", "NAME"]);
    }

    #[test]
    fn test_reserved_keys_only_exempt_under_template() {
        let record = Record::new().attr("version", "6.0");
        let element = export("CHARACTER", &Value::Record(record)).unwrap();
        assert_eq!(element.attribute("VERSION"), Some("6.0"));
    }

    #[test]
    fn test_export_language_similarity_in_fixed_order() {
        let mut table = SimilarityTable::new();
        table.push(Degree::Three, "Orcish");
        table.push(Degree::One, "Foo");
        table.push(Degree::One, "Baz");

        let record = Record::new()
            .attr("XMLID", "LANGUAGES")
            .similar(table)
            .child("NOTES", Value::scalar("n"));

        let element = export("Language", &Value::Record(record)).unwrap();
        assert_eq!(element.tag, "LANGUAGE");
        assert_eq!(
            element.children,
            [
                Element::new("ONEPOINTSIMILARITY").text("Foo"),
                Element::new("ONEPOINTSIMILARITY").text("Baz"),
                Element::new("THREEPOINTSIMILARITY").text("Orcish"),
                Element::new("NOTES").text("n"),
            ]
        );
    }

    #[test]
    fn test_export_language_without_table_fails() {
        let record = Record::new().attr("XMLID", "LANGUAGES");
        let error = export("LANGUAGE", &Value::Record(record)).unwrap_err();
        assert!(matches!(error, Error::MissingSimilarity { ref tag } if tag == "LANGUAGE"));
        assert!(error.is_structural());
    }

    #[test]
    fn test_nested_language_failure_propagates() {
        let record = Record::new().child("LANGUAGE", Record::new());
        assert!(export("SKILLS", &Value::Record(record)).is_err());
    }

    #[test]
    fn test_similarity_under_other_tag_fails() {
        let mut table = SimilarityTable::new();
        table.push(Degree::One, "Foo");
        let record = Record::new().attr("XMLID", "X").similar(table);

        let error = export("SKILL", &Value::Record(record)).unwrap_err();
        assert!(matches!(error, Error::MalformedSimilarity { ref tag, .. } if tag == "SKILL"));
        assert!(error.is_structural());
    }
}
