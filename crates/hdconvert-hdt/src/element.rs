//! In-memory element tree.

use indexmap::IndexMap;

/// A single HDT element.
///
/// Attributes keep their declaration order. `text` is only set for leaf
/// elements whose content is not pure whitespace; the raw text is kept as
/// written, normalisation is left to the consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name of the element.
    pub tag: String,
    /// Attributes as an ordered key/value mapping.
    pub attributes: IndexMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<Element>,
    /// Text content, if any.
    pub text: Option<String>,
}

impl Element {
    /// Create a new element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Set the text content of this element.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add an attribute to this element.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple children.
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Whether the element has neither attributes nor children.
    pub fn is_bare(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }

    /// Look up an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Iterate over the direct children carrying the given tag.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// Total number of elements in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Element::count).sum::<usize>()
    }
}
