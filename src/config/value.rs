//! Dynamic values for schema-less site data.
//!
//! Every top-level key of `site.yaml` that is not a well-known field ends up
//! here, converted from the parsed YAML tree so templates can walk it.

use super::error::ConfigError;
use serde::Serialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Mapping of string keys to dynamic values.
pub type DynamicMap = BTreeMap<String, DynamicValue>;

/// A YAML-derived value of unknown shape.
///
/// Serializes untagged, so the template engine sees plain booleans, numbers,
/// strings, lists and maps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DynamicValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<DynamicValue>),
    Mapping(DynamicMap),
}

impl DynamicValue {
    /// Convert a parsed YAML node.
    ///
    /// Sequences keep their order; mappings require string keys. `null`,
    /// tagged values and non-string keys are conversion errors.
    pub fn from_yaml(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(ConfigError::Conversion(format!("unable to convert number {n}")))
                }
            }
            Value::String(s) => Ok(Self::String(s.clone())),
            Value::Sequence(items) => items
                .iter()
                .map(Self::from_yaml)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Sequence),
            Value::Mapping(mapping) => {
                let mut map = DynamicMap::new();
                for (key, value) in mapping {
                    map.insert(mapping_key(key)?, Self::from_yaml(value)?);
                }
                Ok(Self::Mapping(map))
            }
            Value::Null => Err(ConfigError::Conversion("unable to convert null".into())),
            Value::Tagged(tagged) => Err(ConfigError::Conversion(format!(
                "unable to convert tagged value `{}`",
                tagged.tag
            ))),
        }
    }
}

/// Extract a mapping key, which must be a YAML string.
pub(super) fn mapping_key(key: &Value) -> Result<String, ConfigError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        other => Err(ConfigError::Conversion(format!(
            "mapping key {other:?} is not a string"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(yaml: &str) -> Result<DynamicValue, ConfigError> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        DynamicValue::from_yaml(&value)
    }

    #[test]
    fn test_scalars() {
        assert_eq!(convert("true").unwrap(), DynamicValue::Bool(true));
        assert_eq!(convert("1234").unwrap(), DynamicValue::Integer(1234));
        assert_eq!(convert("-7").unwrap(), DynamicValue::Integer(-7));
        assert_eq!(convert("12.34").unwrap(), DynamicValue::Float(12.34));
        assert_eq!(
            convert("\"Just text.\"").unwrap(),
            DynamicValue::String("Just text.".into())
        );
    }

    #[test]
    fn test_sequence_keeps_order() {
        let value = convert("[three, one, two]").unwrap();
        let expected = DynamicValue::Sequence(vec![
            DynamicValue::String("three".into()),
            DynamicValue::String("one".into()),
            DynamicValue::String("two".into()),
        ]);
        assert_eq!(value, expected);
    }

    #[test]
    fn test_nested_mapping() {
        let value = convert(
            r#"
            - key: value
              emoji: 💸
            - key: to the castle
              count: 3
            "#,
        )
        .unwrap();

        let DynamicValue::Sequence(items) = value else {
            panic!("expected a sequence");
        };
        assert_eq!(items.len(), 2);
        let DynamicValue::Mapping(first) = &items[0] else {
            panic!("expected a mapping");
        };
        assert_eq!(first["emoji"], DynamicValue::String("💸".into()));
        let DynamicValue::Mapping(second) = &items[1] else {
            panic!("expected a mapping");
        };
        assert_eq!(second["count"], DynamicValue::Integer(3));
    }

    #[test]
    fn test_null_is_error() {
        let result = convert("~");
        assert!(matches!(result, Err(ConfigError::Conversion(_))));

        let result = convert("list: [1, null]");
        assert!(matches!(result, Err(ConfigError::Conversion(_))));
    }

    #[test]
    fn test_non_string_key_is_error() {
        let result = convert("{1: one}");
        assert!(matches!(result, Err(ConfigError::Conversion(msg)) if msg.contains("not a string")));
    }

    #[test]
    fn test_tagged_is_error() {
        let result = convert("!custom value");
        assert!(matches!(result, Err(ConfigError::Conversion(msg)) if msg.contains("custom")));
    }

}
