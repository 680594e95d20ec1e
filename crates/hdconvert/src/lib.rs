//! hdconvert - HeroDesigner file conversion library.
//!
//! This crate provides a unified interface to the hdconvert crates for
//! moving HeroDesigner templates, characters and prefabs between their
//! native XML form and YAML.
//!
//! # Crates
//!
//! - [`hdconvert_hdt`] - HDT element trees (XML reading and writing)
//! - [`hdconvert_core`] - Element/YAML mapping, tag transforms, format dispatch
//!
//! # Example
//!
//! ```no_run
//! use hdconvert::prelude::*;
//!
//! let converter = Converter::default();
//!
//! let hdt = std::fs::read_to_string("Heroic6E.hdt")?;
//! let document = converter.read(Format::Hdt, &hdt)?;
//! println!("Root: {}", document.tag);
//!
//! let yaml = converter.write(Format::Yaml, &document)?;
//! std::fs::write("Heroic6E.yaml", yaml)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use hdconvert_core as mapping;
pub use hdconvert_hdt as hdt;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use hdconvert_core::{
        ConvertOptions, Converter, Degree, Document, ErrorKind, Format, Record, RoundTrip,
        SimilarityTable, TagTransform, TransformTable, Value,
    };
    pub use hdconvert_hdt::{Element, ReadOptions, WriteOptions};
}

// Re-export commonly used types at the crate root
pub use hdconvert_core::{Converter, Error, Format, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_converts() {
        let converter = Converter::new(ConvertOptions {
            write: WriteOptions {
                indent: 0,
                ..WriteOptions::default()
            },
            ..ConvertOptions::default()
        });
        let yaml = "POWER:\n- attributes:\n    XMLID: FLIGHT\n- NOTES: fast\n";
        let hdt = converter.convert(yaml, Format::Yaml, Format::Hdt).unwrap();
        assert_eq!(hdt, "<POWER XMLID=\"FLIGHT\"><NOTES>fast</NOTES></POWER>\n");
    }

    #[test]
    fn test_version() {
        assert_eq!(super::VERSION, "0.3.3");
    }
}
