//! Write element trees as HDT text.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Element, Error, Result};

/// Options for writing HDT documents.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Spaces per nesting level; `0` writes everything on one line.
    pub indent: usize,
    /// Emit an `<?xml ...?>` declaration before the root element.
    pub declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            declaration: false,
        }
    }
}

impl Element {
    /// Convert to an HDT string.
    pub fn to_xml_string(&self, options: &WriteOptions) -> Result<String> {
        let mut output = Vec::new();
        self.write_xml(&mut output, options)?;
        String::from_utf8(output).map_err(|e| Error::Xml(e.to_string()))
    }

    /// Write HDT to a writer.
    pub fn write_xml<W: Write>(&self, writer: &mut W, options: &WriteOptions) -> Result<()> {
        let mut xml_writer = if options.indent > 0 {
            Writer::new_with_indent(&mut *writer, b' ', options.indent)
        } else {
            Writer::new(&mut *writer)
        };

        if options.declaration {
            xml_writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
                .map_err(|e| Error::Xml(e.to_string()))?;
            if options.indent == 0 {
                xml_writer.get_mut().write_all(b"\n")?;
            }
        }

        write_element(&mut xml_writer, self)?;
        xml_writer.get_mut().write_all(b"\n")?;

        Ok(())
    }
}

/// Write a single element and its children.
fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let tag = element.tag.as_str();

    let mut start = BytesStart::new(tag);
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if let Some(text) = &element.text {
        writer
            .write_event(Event::Start(start))
            .map_err(|e| Error::Xml(e.to_string()))?;
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| Error::Xml(e.to_string()))?;
        writer
            .write_event(Event::End(BytesEnd::new(tag)))
            .map_err(|e| Error::Xml(e.to_string()))?;
    } else if element.children.is_empty() {
        // Self-closing element
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| Error::Xml(e.to_string()))?;
    } else {
        writer
            .write_event(Event::Start(start))
            .map_err(|e| Error::Xml(e.to_string()))?;

        for child in &element.children {
            write_element(writer, child)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(tag)))
            .map_err(|e| Error::Xml(e.to_string()))?;
    }

    Ok(())
}
