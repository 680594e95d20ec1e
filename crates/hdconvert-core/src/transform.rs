//! Per-tag structural exceptions.
//!
//! The importer and exporter treat every element the same way except where a
//! [`TagTransform`] is registered for its tag. The standard table knows two:
//!
//! - `LANGUAGE` folds its `*POINTSIMILARITY` children into a
//!   [`SimilarityTable`] and unfolds them again on export.
//! - `TEMPLATE` keeps the case of its `version` and `extends` attributes,
//!   which HeroDesigner reads in lower case.

use std::collections::HashMap;

use hdconvert_hdt::Element;

use crate::{Degree, Error, Record, Result, SimilarityTable};

/// Structural hooks for one reserved tag.
///
/// All hooks default to the generic behaviour, so an implementation only
/// overrides what its tag does differently.
pub trait TagTransform: Send + Sync {
    /// The tag this transform applies to. Matched ignoring ASCII case.
    fn tag(&self) -> &str;

    /// Whether records for this tag carry a similarity table.
    fn carries_similarity(&self) -> bool {
        false
    }

    /// Whether an attribute key is written as-is instead of upper-cased.
    fn keeps_attribute_case(&self, _key: &str) -> bool {
        false
    }

    /// Called after the attributes are copied and before any child is visited.
    fn before_children(&self, _record: &mut Record) {}

    /// Offered every child ahead of generic handling. Returns `true` when the
    /// child was absorbed into `record` and must not become a child entry.
    fn consume_child(&self, _record: &mut Record, _child: &Element) -> Result<bool> {
        Ok(false)
    }

    /// Called once every child has been visited.
    fn after_children(&self, _record: &mut Record) -> Result<()> {
        Ok(())
    }

    /// Children synthesised on export, placed before the record's own children.
    fn emit_children(&self, _tag: &str, _record: &Record, _out: &mut Vec<Element>) -> Result<()> {
        Ok(())
    }
}

/// `LANGUAGE`: similarity ratings live in a table instead of child elements.
#[derive(Debug, Default)]
pub struct LanguageTransform;

impl LanguageTransform {
    pub const TAG: &'static str = "LANGUAGE";
}

impl TagTransform for LanguageTransform {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn carries_similarity(&self) -> bool {
        true
    }

    fn before_children(&self, record: &mut Record) {
        record.similarity = Some(SimilarityTable::new());
    }

    fn consume_child(&self, record: &mut Record, child: &Element) -> Result<bool> {
        let Some(degree) = Degree::from_tag(&child.tag) else {
            return Ok(false);
        };

        if !child.is_bare() {
            return Err(Error::malformed_similarity(
                Self::TAG,
                format!("<{}> may only contain text", child.tag),
            ));
        }

        let language = child.text.as_deref().map(str::trim).unwrap_or_default();
        record
            .similarity
            .get_or_insert_with(SimilarityTable::new)
            .push(degree, language);

        Ok(true)
    }

    fn emit_children(&self, tag: &str, record: &Record, out: &mut Vec<Element>) -> Result<()> {
        let table = record
            .similarity
            .as_ref()
            .ok_or_else(|| Error::MissingSimilarity {
                tag: tag.to_string(),
            })?;

        out.extend(
            table
                .iter_export_order()
                .map(|(degree, language)| Element::new(degree.tag()).text(language)),
        );

        Ok(())
    }
}

/// `TEMPLATE`: `version` and `extends` keep their lower-case spelling.
#[derive(Debug, Default)]
pub struct TemplateTransform;

impl TemplateTransform {
    pub const TAG: &'static str = "TEMPLATE";
}

impl TagTransform for TemplateTransform {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn keeps_attribute_case(&self, key: &str) -> bool {
        matches!(key, "version" | "extends")
    }
}

/// Registry of tag transforms, looked up by tag ignoring ASCII case.
pub struct TransformTable {
    transforms: HashMap<String, Box<dyn TagTransform>>,
}

impl TransformTable {
    /// Create a table with no transforms; every tag is handled generically.
    pub fn empty() -> Self {
        Self {
            transforms: HashMap::new(),
        }
    }

    /// The HeroDesigner table: `LANGUAGE` and `TEMPLATE`.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.register(LanguageTransform);
        table.register(TemplateTransform);
        table
    }

    /// Register a transform, replacing any existing one for the same tag.
    pub fn register<T: TagTransform + 'static>(&mut self, transform: T) {
        self.transforms
            .insert(transform.tag().to_ascii_uppercase(), Box::new(transform));
    }

    /// Get the transform for a tag, if any.
    pub fn get(&self, tag: &str) -> Option<&dyn TagTransform> {
        self.transforms
            .get(&tag.to_ascii_uppercase())
            .map(|transform| transform.as_ref())
    }

    /// Whether records for `tag` carry a similarity table.
    pub fn carries_similarity(&self, tag: &str) -> bool {
        self.get(tag)
            .is_some_and(|transform| transform.carries_similarity())
    }

    /// Tags with a registered transform, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<_> = self.transforms.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for TransformTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for TransformTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformTable")
            .field("tags", &self.tags())
            .finish()
    }
}
