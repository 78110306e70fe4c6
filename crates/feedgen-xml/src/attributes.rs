//! Ordered attribute maps.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Attribute value: a string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for AttrValue {
    fn from(value: u64) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Insertion-ordered attribute map.
///
/// Keys map to a value or to nothing. Absent values are kept in the map (so a
/// later insert lands in the same position) but are never printed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, Option<AttrValue>)>,
}

impl Attributes {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    ///
    /// Replacing keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.set(key, Some(value.into()));
    }

    /// Insert or replace a possibly absent value.
    pub fn set(&mut self, key: impl Into<String>, value: Option<AttrValue>) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Builder form of [`Attributes::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder form of [`Attributes::set`].
    #[must_use]
    pub fn with_opt<V: Into<AttrValue>>(
        mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        self.set(key, value.map(Into::into));
        self
    }

    /// Look up a present value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Iterate over present values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v)))
    }

    /// Whether no value is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to strings or numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Attributes, A::Error> {
                let mut attributes = Attributes::new();
                while let Some((key, value)) = access.next_entry::<String, Option<AttrValue>>()? {
                    attributes.set(key, value);
                }
                Ok(attributes)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let attrs = Attributes::new().with("b", "1").with("a", "2");
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let attrs = Attributes::new()
            .with("length", 0_i64)
            .with("type", "audio/mp3")
            .with("url", "https://example.com/a.mp3")
            .with("length", 1234_i64);
        let pairs: Vec<(&str, String)> = attrs.iter().map(|(k, v)| (k, v.to_string())).collect();
        assert_eq!(
            pairs,
            vec![
                ("length", "1234".to_owned()),
                ("type", "audio/mp3".to_owned()),
                ("url", "https://example.com/a.mp3".to_owned()),
            ]
        );
    }

    #[test]
    fn test_absent_values_are_skipped() {
        let attrs = Attributes::new().with_opt::<String>("domain", None);
        assert!(attrs.is_empty());
        assert_eq!(attrs.get("domain"), None);
    }

    #[test]
    fn test_display_numbers() {
        assert_eq!(AttrValue::from(0_u32).to_string(), "0");
        assert_eq!(AttrValue::from(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let attrs: Attributes = serde_json::from_str(r#"{"z": 1, "a": "x", "m": null}"#).unwrap();
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(attrs.get("z"), Some(&AttrValue::Int(1)));
    }

    #[test]
    fn test_serialize_skips_absent() {
        let attrs = Attributes::new().with("a", "1").with_opt::<String>("b", None);
        assert_eq!(serde_json::to_string(&attrs).unwrap(), r#"{"a":"1"}"#);
    }
}
