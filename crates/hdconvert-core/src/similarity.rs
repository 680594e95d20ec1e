//! Language similarity tables.
//!
//! HeroDesigner records how close one language is to others with sibling
//! elements such as `<TWOPOINTSIMILARITY>Elvish</TWOPOINTSIMILARITY>` inside a
//! `LANGUAGE` element. In YAML these become a single table keyed by degree:
//!
//! ```yaml
//! - similar:
//!     one: [Dwarvish]
//!     two: [Elvish, Sylvan]
//! ```

use indexmap::IndexMap;

/// Degree of similarity between two languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Degree {
    One,
    Two,
    Three,
    Four,
}

impl Degree {
    /// All degrees in export order.
    pub const ALL: [Degree; 4] = [Degree::One, Degree::Two, Degree::Three, Degree::Four];

    /// Key used in the YAML table.
    pub fn key(self) -> &'static str {
        match self {
            Degree::One => "one",
            Degree::Two => "two",
            Degree::Three => "three",
            Degree::Four => "four",
        }
    }

    /// Tag of the HDT element carrying one entry of this degree.
    pub fn tag(self) -> &'static str {
        match self {
            Degree::One => "ONEPOINTSIMILARITY",
            Degree::Two => "TWOPOINTSIMILARITY",
            Degree::Three => "THREEPOINTSIMILARITY",
            Degree::Four => "FOURPOINTSIMILARITY",
        }
    }

    /// Look up a degree by its YAML key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|degree| degree.key() == key)
    }

    /// Look up a degree by its HDT tag, ignoring ASCII case.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|degree| degree.tag().eq_ignore_ascii_case(tag))
    }
}

/// Similarity entries grouped by degree.
///
/// Degrees keep the order in which they were first seen; exporting always
/// walks them in [`Degree::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimilarityTable {
    entries: IndexMap<Degree, Vec<String>>,
}

impl SimilarityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a language to the list for `degree`, creating the list on first use.
    pub fn push(&mut self, degree: Degree, language: impl Into<String>) {
        self.entries.entry(degree).or_default().push(language.into());
    }

    /// Replace the whole list for `degree`.
    pub fn insert(&mut self, degree: Degree, languages: Vec<String>) {
        self.entries.insert(degree, languages);
    }

    pub fn get(&self, degree: Degree) -> Option<&[String]> {
        self.entries.get(&degree).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Degrees with their lists, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (Degree, &[String])> {
        self.entries
            .iter()
            .map(|(degree, languages)| (*degree, languages.as_slice()))
    }

    /// Every `(degree, language)` pair in export order.
    pub fn iter_export_order(&self) -> impl Iterator<Item = (Degree, &str)> {
        Degree::ALL.into_iter().flat_map(move |degree| {
            self.get(degree)
                .unwrap_or_default()
                .iter()
                .map(move |language| (degree, language.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_lookup() {
        assert_eq!(Degree::from_key("three"), Some(Degree::Three));
        assert_eq!(Degree::from_key("THREE"), None);
        assert_eq!(Degree::from_tag("FOURPOINTSIMILARITY"), Some(Degree::Four));
        assert_eq!(Degree::from_tag("onePointSimilarity"), Some(Degree::One));
        assert_eq!(Degree::from_tag("FIVEPOINTSIMILARITY"), None);
    }

    #[test]
    fn test_push_keeps_first_seen_order() {
        let mut table = SimilarityTable::new();
        table.push(Degree::Two, "Elvish");
        table.push(Degree::One, "Dwarvish");
        table.push(Degree::Two, "Sylvan");

        let degrees: Vec<_> = table.iter().map(|(degree, _)| degree).collect();
        assert_eq!(degrees, [Degree::Two, Degree::One]);
        assert_eq!(table.get(Degree::Two).unwrap(), ["Elvish", "Sylvan"]);
    }

    #[test]
    fn test_export_order() {
        let mut table = SimilarityTable::new();
        table.push(Degree::Four, "Orcish");
        table.push(Degree::One, "Dwarvish");
        table.insert(Degree::Two, Vec::new());

        let pairs: Vec<_> = table.iter_export_order().collect();
        assert_eq!(pairs, [(Degree::One, "Dwarvish"), (Degree::Four, "Orcish")]);
        assert!(!table.is_empty());
    }
}
