//! Reading, writing and converting whole documents.

use hdconvert_hdt::{Element, ReadOptions, WriteOptions};
use tracing::debug;

use crate::yaml::{self, YamlDecoder};
use crate::{Document, Exporter, Format, Importer, Result, TransformTable};

/// Options passed through to the HDT reader and writer.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub read: ReadOptions,
    pub write: WriteOptions,
}

/// Outcome of [`Converter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTrip {
    /// Writing the document as YAML and reading it back gives the same document.
    pub yaml_stable: bool,
    /// The HDT written for the document is unchanged by a second
    /// write/read/import/export cycle.
    pub hdt_stable: bool,
}

impl RoundTrip {
    pub fn is_stable(&self) -> bool {
        self.yaml_stable && self.hdt_stable
    }
}

/// Selects the reader and writer for each [`Format`].
///
/// # Example
///
/// ```no_run
/// use hdconvert_core::{Converter, Format};
///
/// let hdt = std::fs::read_to_string("Heroic.hdt")?;
/// let yaml = Converter::default().convert(&hdt, Format::Hdt, Format::Yaml)?;
/// print!("{}", yaml);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Converter {
    transforms: TransformTable,
    options: ConvertOptions,
}

impl Converter {
    /// A converter with the standard transform table.
    pub fn new(options: ConvertOptions) -> Self {
        Self::with_transforms(TransformTable::standard(), options)
    }

    pub fn with_transforms(transforms: TransformTable, options: ConvertOptions) -> Self {
        Self {
            transforms,
            options,
        }
    }

    pub fn transforms(&self) -> &TransformTable {
        &self.transforms
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Parse text in the given format into a document.
    pub fn read(&self, format: Format, text: &str) -> Result<Document> {
        match format {
            Format::Hdt => {
                let root = Element::from_xml(text, &self.options.read)?;
                Importer::new(&self.transforms).import_document(&root)
            }
            Format::Yaml => YamlDecoder::new(&self.transforms).parse(text),
        }
    }

    /// Serialise a document in the given format.
    pub fn write(&self, format: Format, document: &Document) -> Result<String> {
        match format {
            Format::Hdt => {
                let root = Exporter::new(&self.transforms).export_document(document)?;
                Ok(root.to_xml_string(&self.options.write)?)
            }
            Format::Yaml => yaml::to_string_with(&self.transforms, document),
        }
    }

    /// Read `text` as `from` and write it as `to`.
    pub fn convert(&self, text: &str, from: Format, to: Format) -> Result<String> {
        debug!(%from, %to, bytes = text.len(), "converting");
        let document = self.read(from, text)?;
        self.write(to, &document)
    }

    /// Push a document through both encodings and report whether it survives.
    pub fn check(&self, document: &Document) -> Result<RoundTrip> {
        let yaml_text = self.write(Format::Yaml, document)?;
        let yaml_stable = self.read(Format::Yaml, &yaml_text)? == *document;

        let first = self.write(Format::Hdt, document)?;
        let second = self.write(Format::Hdt, &self.read(Format::Hdt, &first)?)?;
        let hdt_stable = first == second;

        debug!(yaml_stable, hdt_stable, "round trip checked");
        Ok(RoundTrip {
            yaml_stable,
            hdt_stable,
        })
    }
}
