//! Template serialization — renders the exportable value tree as YAML.
//!
//! The three reference variants map onto custom scalar tags (`!Ref`,
//! `!GetAtt`, `!Base64`) through serde's newtype-variant encoding, which
//! serde_yaml_ng emits as YAML tags. Every other value uses the native YAML
//! encodings. The dispatch is closed: a reference reaching this module has
//! exactly one of the three known shapes.

use serde::ser::{Serialize, Serializer};

use super::types::{Reference, Value};

impl Serialize for Reference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Ref { name } => {
                serializer.serialize_newtype_variant("Reference", 0, "Ref", name)
            }
            Self::GetAtt { name, attribute } => serializer.serialize_newtype_variant(
                "Reference",
                1,
                "GetAtt",
                &format!("{name}.{attribute}"),
            ),
            Self::Base64 { content } => {
                serializer.serialize_newtype_variant("Reference", 2, "Base64", content)
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::String(v) => serializer.serialize_str(v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::List(items) => serializer.collect_seq(items),
            Self::Map(entries) => serializer.collect_map(entries),
            Self::Ref(reference) => reference.serialize(serializer),
        }
    }
}

/// Render a template value tree as YAML text.
///
/// Total for trees produced by validated stacks; a failure here is an
/// internal invariant violation and aborts.
pub fn render(value: &Value) -> String {
    serde_yaml_ng::to_string(value).expect("template tree serializes to YAML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_ref_scalar_tag() {
        let text = render(&Value::Ref(Reference::new("MainVPC")));
        assert_eq!(text, "!Ref MainVPC\n");
    }

    #[test]
    fn test_getatt_scalar_tag_joins_name_and_attribute() {
        let reference = Reference::GetAtt {
            name: "Server".to_string(),
            attribute: "PublicIp".to_string(),
        };
        assert_eq!(render(&Value::Ref(reference)), "!GetAtt Server.PublicIp\n");
    }

    #[test]
    fn test_base64_scalar_tag() {
        let text = render(&Value::Ref(Reference::base64("hello")));
        assert_eq!(text, "!Base64 hello\n");
    }

    #[test]
    fn test_native_scalars() {
        assert_eq!(render(&Value::from("plain")), "plain\n");
        assert_eq!(render(&Value::Int(42)), "42\n");
        assert_eq!(render(&Value::Bool(false)), "false\n");
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let tree = Value::Map(IndexMap::from([
            ("Zulu".to_string(), Value::Int(1)),
            ("Alpha".to_string(), Value::Int(2)),
            ("Mike".to_string(), Value::Int(3)),
        ]));
        let text = render(&tree);
        let zulu = text.find("Zulu").unwrap();
        let alpha = text.find("Alpha").unwrap();
        let mike = text.find("Mike").unwrap();
        assert!(zulu < alpha && alpha < mike);
    }

    #[test]
    fn test_reference_nested_in_map() {
        let tree = Value::Map(IndexMap::from([(
            "VpcId".to_string(),
            Value::Ref(Reference::new("Net")),
        )]));
        assert_eq!(render(&tree), "VpcId: !Ref Net\n");
    }

    #[test]
    fn test_list_of_references() {
        let tree = Value::List(vec![
            Value::Ref(Reference::new("GroupA")),
            Value::Ref(Reference::new("GroupB")),
        ]);
        assert_eq!(render(&tree), "- !Ref GroupA\n- !Ref GroupB\n");
    }
}
