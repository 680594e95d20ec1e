//! Parse HDT text into an element tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{trace, warn};

use crate::{Element, Error, Result};

/// Options for reading HDT documents.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Maximum element nesting depth accepted before giving up.
    pub max_depth: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// An element whose end tag has not been seen yet.
struct OpenElement {
    element: Element,
    text: String,
    has_children: bool,
}

impl OpenElement {
    fn new(element: Element) -> Self {
        Self {
            element,
            text: String::new(),
            has_children: false,
        }
    }

    /// Text appearing after the first child is tail text and is not kept.
    fn push_text(&mut self, text: &str) {
        if !self.has_children {
            self.text.push_str(text);
        } else if !text.trim().is_empty() {
            warn!(tag = %self.element.tag, "discarding text after a child element");
        }
    }

    fn finish(mut self) -> Element {
        if !self.text.trim().is_empty() {
            self.element.text = Some(self.text);
        }
        self.element
    }
}

impl Element {
    /// Parse HDT text and return its root element.
    pub fn from_xml(xml: &str, options: &ReadOptions) -> Result<Self> {
        parse_document(xml, options)
    }

    /// Parse HDT bytes and return the root element.
    pub fn from_xml_bytes(xml: &[u8], options: &ReadOptions) -> Result<Self> {
        let xml_str = std::str::from_utf8(xml).map_err(Error::Utf8)?;
        Self::from_xml(xml_str, options)
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(tag);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        element.attributes.insert(key, value);
    }

    Ok(element)
}

/// Attach a completed element to its parent, or make it the root.
fn attach(stack: &mut [OpenElement], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.has_children = true;
        parent.element.children.push(element);
        Ok(())
    } else if root.is_some() {
        Err(Error::MultipleRoots { tag: element.tag })
    } else {
        *root = Some(element);
        Ok(())
    }
}

fn check_depth(depth: usize, options: &ReadOptions) -> Result<()> {
    if depth >= options.max_depth {
        return Err(Error::DepthExceeded {
            limit: options.max_depth,
        });
    }
    Ok(())
}

fn parse_document(xml: &str, options: &ReadOptions) -> Result<Element> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                check_depth(stack.len(), options)?;
                let element = element_from_start(&e)?;
                trace!(tag = %element.tag, depth = stack.len(), "open element");
                stack.push(OpenElement::new(element));
            }
            Ok(Event::Empty(e)) => {
                check_depth(stack.len(), options)?;
                let element = element_from_start(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                if let Some(open) = stack.pop() {
                    attach(&mut stack, &mut root, open.finish())?;
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(open) = stack.last_mut() {
                    let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                    open.push_text(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(open) = stack.last_mut() {
                    let text = std::str::from_utf8(&e)?;
                    open.push_text(text);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // Declarations, comments, processing instructions, doctype
            Err(e) => return Err(Error::Xml(format!("XML parse error: {}", e))),
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Xml(format!("unclosed element <{}>", open.element.tag)));
    }

    root.ok_or(Error::NoRoot)
}
