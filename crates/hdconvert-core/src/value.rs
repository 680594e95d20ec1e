//! Generic document model shared by both directions of the conversion.

use indexmap::IndexMap;

use crate::SimilarityTable;

/// The structured form of one HDT element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Text of a leaf element.
    Scalar(String),
    /// Attributes and children of a structural element.
    Record(Record),
}

impl Value {
    pub fn scalar(text: impl Into<String>) -> Self {
        Value::Scalar(text.into())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(text) => Some(text),
            Value::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            Value::Scalar(_) => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Record(Record::default())
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

/// A structural element: its attributes, an optional similarity table and
/// its children in document order.
///
/// On the YAML side this is flattened into a sequence; see [`crate::yaml`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub attributes: IndexMap<String, String>,
    pub similarity: Option<SimilarityTable>,
    pub children: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes(attributes: IndexMap<String, String>) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Add an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add a child.
    pub fn child(mut self, tag: impl Into<String>, value: impl Into<Value>) -> Self {
        self.children.push((tag.into(), value.into()));
        self
    }

    /// Attach a similarity table.
    pub fn similar(mut self, table: SimilarityTable) -> Self {
        self.similarity = Some(table);
        self
    }

    /// An empty record stands for an element with no attributes and no children.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.similarity.is_none() && self.children.is_empty()
    }

    /// Values of the children carrying the given tag.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.children
            .iter()
            .filter(move |(child_tag, _)| child_tag == tag)
            .map(|(_, value)| value)
    }
}

/// A whole document: the root tag and its value.
///
/// In YAML this is the single-entry mapping `{ tag: value }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub tag: String,
    pub root: Value,
}

impl Document {
    pub fn new(tag: impl Into<String>, root: impl Into<Value>) -> Self {
        Self {
            tag: tag.into(),
            root: root.into(),
        }
    }
}
