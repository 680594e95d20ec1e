use hdconvert_core::{
    export, import, yaml, Converter, Degree, Document, Error, ErrorKind, Format, Record,
    SimilarityTable, TagTransform, TransformTable, Value,
};
use hdconvert_hdt::Element;

const CHARACTER_HDC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CHARACTER version="6.0" TEMPLATE="builtIn.Heroic6E.hdt">
  <BASIC_CONFIGURATION BASE_POINTS="175" DISAD_POINTS="75" EXPERIENCE="0"/>
  <CHARACTER_INFO CHARACTER_NAME="Ace" ALTERNATE_IDENTITIES="">
    <BACKGROUND>Grew up
      on a   farm.</BACKGROUND>
    <PERSONALITY/>
  </CHARACTER_INFO>
  <SKILLS>
    <SKILL XMLID="ACROBATICS" BASECOST="3.0" LEVELS="0"/>
    <LANGUAGE XMLID="LANGUAGES" BASECOST="1.0">
      <ONEPOINTSIMILARITY>Foo</ONEPOINTSIMILARITY>
      <TWOPOINTSIMILARITY>Bar</TWOPOINTSIMILARITY>
      <NOTES>native</NOTES>
    </LANGUAGE>
  </SKILLS>
</CHARACTER>
"#;

#[test]
fn test_similarity_wire_form() {
    let element = Element::new("LANGUAGE")
        .child(Element::new("ONEPOINTSIMILARITY").text("Foo"))
        .child(Element::new("TWOPOINTSIMILARITY").text("Bar"));

    let value = import(&element).unwrap();
    let wire = serde_yaml::to_value(&value).unwrap();
    let entries = wire.as_sequence().unwrap();
    assert_eq!(entries.len(), 2);

    let expected: serde_yaml::Value =
        serde_yaml::from_str("similar:\n  one: [Foo]\n  two: [Bar]\n").unwrap();
    assert_eq!(entries[1], expected);

    let exported = export("LANGUAGE", &value).unwrap();
    assert_eq!(exported, element);
}

#[test]
fn test_empty_element() {
    let value = import(&Element::new("X")).unwrap();
    assert_eq!(value, Value::Record(Record::new()));
    assert_eq!(yaml::to_string(&Document::new("X", value.clone())).unwrap(), "X: []\n");

    let exported = export("X", &value).unwrap();
    assert_eq!(exported, Element::new("X"));
}

#[test]
fn test_attribute_order() {
    let element = Element::new("POWER").attr("b", "2").attr("a", "1");
    let value = import(&element).unwrap();

    let keys: Vec<_> = value.as_record().unwrap().attributes.keys().cloned().collect();
    assert_eq!(keys, ["b", "a"]);

    let exported = export("POWER", &value).unwrap();
    let keys: Vec<_> = exported.attributes.keys().cloned().collect();
    assert_eq!(keys, ["B", "A"]);
}

#[test]
fn test_text_with_attribute_is_rejected() {
    let element = Element::new("NOTES").attr("ID", "1").text("hello");
    let error = import(&element).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Structural);
}

#[test]
fn test_character_to_yaml() {
    let converter = Converter::default();
    let document = converter.read(Format::Hdt, CHARACTER_HDC).unwrap();
    assert_eq!(document.tag, "CHARACTER");

    let root = document.root.as_record().unwrap();
    assert_eq!(root.attributes["version"], "6.0");

    let info = root.children_named("CHARACTER_INFO").next().unwrap().as_record().unwrap();
    assert_eq!(info.attributes["ALTERNATE_IDENTITIES"], "");
    assert_eq!(
        info.children_named("BACKGROUND").next(),
        Some(&Value::scalar("Grew up on a farm."))
    );
    assert_eq!(
        info.children_named("PERSONALITY").next(),
        Some(&Value::Record(Record::new()))
    );

    let skills = root.children_named("SKILLS").next().unwrap().as_record().unwrap();
    let language = skills.children_named("LANGUAGE").next().unwrap().as_record().unwrap();
    let table = language.similarity.as_ref().unwrap();
    assert_eq!(table.get(Degree::One).unwrap(), ["Foo"]);
    assert_eq!(table.get(Degree::Two).unwrap(), ["Bar"]);
    assert_eq!(language.children.len(), 1);
}

#[test]
fn test_character_round_trip_through_yaml() {
    let converter = Converter::default();
    let yaml_text = converter.convert(CHARACTER_HDC, Format::Hdt, Format::Yaml).unwrap();
    let hdt = converter.convert(&yaml_text, Format::Yaml, Format::Hdt).unwrap();

    let original = converter.read(Format::Hdt, CHARACTER_HDC).unwrap();
    let restored = converter.read(Format::Hdt, &hdt).unwrap();
    // Only the root's lower-case `version` attribute changes case on the way back.
    let mut expected = original.clone();
    if let Value::Record(root) = &mut expected.root {
        let version = root.attributes.shift_remove("version").unwrap();
        root.attributes.shift_insert(0, "VERSION".to_string(), version);
    }
    assert_eq!(restored, expected);
    assert!(converter.check(&original).unwrap().is_stable());
}

#[test]
fn test_hand_written_yaml() {
    let yaml_text = r#"
template:
- attributes:
    version: '6.0'
    extends: builtIn.Heroic.hdt
- language:
  - attributes:
      xmlid: LANGUAGES
  - similar:
      two: [Elvish]
      one: [Dwarvish]
- notes: |
    Multi
    line
"#;
    let hdt = Converter::default()
        .convert(yaml_text, Format::Yaml, Format::Hdt)
        .unwrap();
    assert_eq!(
        hdt,
        "<TEMPLATE version=\"6.0\" extends=\"builtIn.Heroic.hdt\">\n  <LANGUAGE XMLID=\"LANGUAGES\">\n    <ONEPOINTSIMILARITY>Dwarvish</ONEPOINTSIMILARITY>\n    <TWOPOINTSIMILARITY>Elvish</TWOPOINTSIMILARITY>\n  </LANGUAGE>\n  <NOTES>Multi\nline\n</NOTES>\n</TEMPLATE>\n"
    );
}

#[test]
fn test_language_missing_similarity_in_yaml() {
    let yaml_text = "SKILLS:\n- attributes: {}\n- LANGUAGE:\n  - attributes:\n      XMLID: LANGUAGES\n";
    let error = Converter::default()
        .convert(yaml_text, Format::Yaml, Format::Hdt)
        .unwrap_err();
    assert!(matches!(error, Error::MissingSimilarity { ref tag } if tag == "LANGUAGE"));
}

#[test]
fn test_bare_language_round_trips() {
    let converter = Converter::default();
    let yaml_text = converter.convert("<LANGUAGE/>", Format::Hdt, Format::Yaml).unwrap();
    assert_eq!(yaml_text, "LANGUAGE:\n- attributes: {}\n- similar: {}\n");
    let hdt = converter.convert(&yaml_text, Format::Yaml, Format::Hdt).unwrap();
    assert_eq!(hdt, "<LANGUAGE/>\n");
}

/// Folds `<ALIAS>` children of `POWER` into a comma-separated attribute.
struct AliasTransform;

impl TagTransform for AliasTransform {
    fn tag(&self) -> &str {
        "POWER"
    }

    fn consume_child(&self, record: &mut Record, child: &Element) -> hdconvert_core::Result<bool> {
        if child.tag != "ALIAS" {
            return Ok(false);
        }
        let alias = child.text.clone().unwrap_or_default();
        record
            .attributes
            .entry("ALIASES".to_string())
            .and_modify(|aliases| {
                aliases.push(',');
                aliases.push_str(&alias);
            })
            .or_insert(alias);
        Ok(true)
    }
}

#[test]
fn test_custom_transform_table() {
    let mut transforms = TransformTable::standard();
    transforms.register(AliasTransform);
    let converter = Converter::with_transforms(transforms, Default::default());

    let document = converter
        .read(
            Format::Hdt,
            "<POWER XMLID=\"BLAST\"><ALIAS>Zap</ALIAS><NOTES>x</NOTES><ALIAS>Bolt</ALIAS></POWER>",
        )
        .unwrap();

    let record = document.root.as_record().unwrap();
    assert_eq!(record.attributes["ALIASES"], "Zap,Bolt");
    assert_eq!(record.children.len(), 1);
    assert!(record.similarity.is_none());
}

#[test]
fn test_similarity_table_from_yaml_order() {
    let document = yaml::from_str("LANGUAGE:\n- attributes: {}\n- similar:\n    four: [A]\n    one: [B, C]\n").unwrap();
    let mut expected = SimilarityTable::new();
    expected.push(Degree::Four, "A");
    expected.push(Degree::One, "B");
    expected.push(Degree::One, "C");
    assert_eq!(document.root.as_record().unwrap().similarity, Some(expected));
}
