//! Bidirectional mapping between HeroDesigner element trees and YAML.
//!
//! An HDT element becomes either a string (a text-only leaf) or a record of
//! its attributes and children. Records are written to YAML as ordered
//! sequences so that attribute order, child order and repeated tags all
//! survive a round trip:
//!
//! ```yaml
//! CHARACTER:
//! - attributes:
//!     version: '6.0'
//! - BASIC_CONFIGURATION:
//!   - attributes:
//!       BASE_POINTS: '200'
//! - NOTES: Grew up on a farm.
//! ```
//!
//! A few tags need special handling; these are registered in a
//! [`TransformTable`] rather than hard-coded in the traversal.
//!
//! # Example
//!
//! ```no_run
//! use hdconvert_core::{Converter, Format};
//!
//! let converter = Converter::default();
//! let yaml = std::fs::read_to_string("Ace.yaml")?;
//! let document = converter.read(Format::Yaml, &yaml)?;
//! let hdt = converter.write(Format::Hdt, &document)?;
//! std::fs::write("Ace.hdc", hdt)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod convert;
mod error;
mod export;
mod format;
mod import;
mod similarity;
mod transform;
mod value;

pub mod yaml;

pub use convert::{ConvertOptions, Converter, RoundTrip};
pub use error::{Error, ErrorKind, Result};
pub use export::{export, export_document, Exporter};
pub use format::Format;
pub use import::{import, import_document, normalize_whitespace, Importer};
pub use similarity::{Degree, SimilarityTable};
pub use transform::{LanguageTransform, TagTransform, TemplateTransform, TransformTable};
pub use value::{Document, Record, Value};
