//! Gateway parameter models
//!
//! Scalar parameter values and the ordered parameter bag that gateways and
//! requests keep their configuration in.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A scalar configuration value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret the value as a flag. Strings like "1", "true", "yes" count.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            ParamValue::Integer(i) => Some(*i != 0),
            ParamValue::String(s) => match s.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Some(true),
                "0" | "false" | "no" | "off" | "" => Some(false),
                _ => None,
            },
            ParamValue::Float(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::Integer(_) => "integer",
            ParamValue::Float(_) => "float",
            ParamValue::String(_) => "string",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Integer(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

/// Ordered key/value parameter storage.
///
/// Keys keep their insertion order. Setting a key that is already present
/// replaces the value without moving the entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterBag {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ParamValue::as_bool)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Insert every entry of `other`, overriding existing keys
    pub fn merge(&mut self, other: &ParameterBag) {
        for (key, value) in other.iter() {
            self.set(key, value.clone());
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = ParameterBag::new();
        for (key, value) in iter {
            bag.set(key, value);
        }
        bag
    }
}

impl Serialize for ParameterBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ParameterBag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BagVisitor;

        impl<'de> Visitor<'de> for BagVisitor {
            type Value = ParameterBag;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of parameter names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut bag = ParameterBag::new();
                while let Some((key, value)) = access.next_entry::<String, ParamValue>()? {
                    bag.set(key, value);
                }
                Ok(bag)
            }
        }

        deserializer.deserialize_map(BagVisitor)
    }
}

/// A declared default parameter with its derived accessor names
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    pub key: String,
    pub default_value: ParamValue,
    pub getter_name: String,
    pub setter_name: String,
}

impl fmt::Display for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} ({} / {})",
            self.key, self.default_value, self.getter_name, self.setter_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bag_preserves_insertion_order() {
        let bag = ParameterBag::new()
            .with("zeta", "1")
            .with("alpha", true)
            .with("mid", 3_i64);

        let keys: Vec<_> = bag.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_bag_set_replaces_in_place() {
        let mut bag = ParameterBag::new().with("a", "1").with("b", "2");
        bag.set("a", "3");

        assert_eq!(bag.len(), 2);
        assert_eq!(bag.get_str("a"), Some("3"));
        assert_eq!(bag.keys().next(), Some("a"));
    }

    #[test]
    fn test_bag_remove_and_merge() {
        let mut bag = ParameterBag::new().with("a", "1").with("b", "2");
        assert_eq!(bag.remove("a"), Some(ParamValue::from("1")));
        assert!(bag.remove("a").is_none());

        bag.merge(&ParameterBag::new().with("b", "9").with("c", false));
        assert_eq!(bag.get_str("b"), Some("9"));
        assert_eq!(bag.get_bool("c"), Some(false));
    }

    #[test]
    fn test_param_value_as_bool() {
        assert_eq!(ParamValue::from("yes").as_bool(), Some(true));
        assert_eq!(ParamValue::from("0").as_bool(), Some(false));
        assert_eq!(ParamValue::from("probe-1").as_bool(), None);
        assert_eq!(ParamValue::Integer(2).as_bool(), Some(true));
    }

    #[test]
    fn test_bag_serializes_as_ordered_map() {
        let bag = ParameterBag::new().with("b", "x").with("a", false);
        let json = serde_json::to_string(&bag).unwrap();
        assert_eq!(json, r#"{"b":"x","a":false}"#);

        let back: ParameterBag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bag);
    }

    #[test]
    fn test_bag_from_yaml() {
        let bag: ParameterBag = serde_yaml::from_str("apiKey: abc\ntestMode: true\n").unwrap();
        assert_eq!(bag.get_str("apiKey"), Some("abc"));
        assert_eq!(bag.get_bool("testMode"), Some(true));
    }
}
