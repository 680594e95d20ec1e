//! Element tree → document.

use hdconvert_hdt::Element;
use tracing::{debug, trace};

use crate::{Document, Error, Record, Result, TransformTable, Value};

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Converts element trees into [`Value`] trees.
#[derive(Debug, Clone, Copy)]
pub struct Importer<'t> {
    transforms: &'t TransformTable,
}

impl<'t> Importer<'t> {
    pub fn new(transforms: &'t TransformTable) -> Self {
        Self { transforms }
    }

    /// Import a root element as a tag-rooted document.
    pub fn import_document(&self, root: &Element) -> Result<Document> {
        debug!(tag = %root.tag, elements = root.count(), "importing document");
        Ok(Document::new(root.tag.clone(), self.import(root)?))
    }

    /// Import a single element and its subtree.
    ///
    /// Leaf text becomes [`Value::Scalar`]; everything else becomes a
    /// [`Record`]. An element carrying both text and attributes or children
    /// is rejected.
    pub fn import(&self, element: &Element) -> Result<Value> {
        let text = element
            .text
            .as_deref()
            .map(normalize_whitespace)
            .filter(|text| !text.is_empty());

        if let Some(text) = text {
            if !element.is_bare() {
                return Err(Error::TextWithStructure {
                    tag: element.tag.clone(),
                    text,
                    attributes: element.attributes.len(),
                    children: element.children.len(),
                });
            }
            return Ok(Value::Scalar(text));
        }

        let transform = self.transforms.get(&element.tag);
        if element.is_bare() && transform.is_none() {
            return Ok(Value::Record(Record::new()));
        }

        let mut record = Record::with_attributes(element.attributes.clone());
        if let Some(transform) = transform {
            trace!(tag = %element.tag, "applying tag transform");
            transform.before_children(&mut record);
        }

        for child in &element.children {
            if let Some(transform) = transform {
                if transform.consume_child(&mut record, child)? {
                    continue;
                }
            }
            record.children.push((child.tag.clone(), self.import(child)?));
        }

        if let Some(transform) = transform {
            transform.after_children(&mut record)?;
        }

        Ok(Value::Record(record))
    }
}

/// Import an element with the standard transform table.
pub fn import(element: &Element) -> Result<Value> {
    Importer::new(&TransformTable::standard()).import(element)
}

/// Import a root element as a document with the standard transform table.
pub fn import_document(root: &Element) -> Result<Document> {
    Importer::new(&TransformTable::standard()).import_document(root)
}
