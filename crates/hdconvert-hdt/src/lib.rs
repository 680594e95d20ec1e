//! Element tree reader and writer for HeroDesigner HDT files.
//!
//! HeroDesigner stores templates, characters and prefabs as plain XML with
//! upper-case tags. This crate reads such files into a small [`Element`] tree
//! and writes element trees back out. Only what HeroDesigner uses is kept:
//! tags, attributes in declaration order, child elements and leaf text.
//! Comments, processing instructions and text trailing a child element are
//! dropped.
//!
//! # Example
//!
//! ```no_run
//! use hdconvert_hdt::{Element, ReadOptions, WriteOptions};
//!
//! let data = std::fs::read_to_string("Heroic.hdt")?;
//! let root = Element::from_xml(&data, &ReadOptions::default())?;
//! println!("{} has {} children", root.tag, root.children.len());
//!
//! let xml = root.to_xml_string(&WriteOptions::default())?;
//! print!("{}", xml);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod element;
mod error;
mod reader;
mod writer;

pub use element::Element;
pub use error::{Error, Result};
pub use reader::ReadOptions;
pub use writer::WriteOptions;
