//! Format identifiers.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::Error;

/// A document encoding the converter can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// HeroDesigner XML (`.hdt`, `.hdc`, ...).
    Hdt,
    /// The YAML record encoding.
    Yaml,
}

impl Format {
    pub const ALL: [Format; 2] = [Format::Hdt, Format::Yaml];

    /// Canonical identifier, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Format::Hdt => "hdt",
            Format::Yaml => "yaml",
        }
    }

    /// File extension used when writing this format.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Hdt => "hdt",
            Format::Yaml => "yaml",
        }
    }

    /// Every file extension recognised as this format, without the dot.
    pub fn file_extensions(self) -> &'static [&'static str] {
        match self {
            Format::Hdt => &["hdt", "hdc", "hdp", "hdl", "hdm"],
            Format::Yaml => &["yaml", "yml"],
        }
    }

    /// The format on the other side of a conversion.
    pub fn other(self) -> Self {
        match self {
            Format::Hdt => Format::Yaml,
            Format::Yaml => Format::Hdt,
        }
    }

    /// Detect the format from a file extension, ignoring case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.file_extensions().contains(&extension.as_str()))
    }

    /// Detect the format from a path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|extension| extension.to_str())
            .and_then(Self::from_extension)
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            // "hd" was the identifier used by the first release.
            "hdt" | "hd" => Ok(Format::Hdt),
            "yaml" | "yml" => Ok(Format::Yaml),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
