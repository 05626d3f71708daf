//! Accessor name resolution
//!
//! Maps a parameter key, in whatever casing the gateway declares it, onto
//! the `get<Stem>` / `set<Stem>` accessor pair and locates the matching
//! binding or request entry.

use serde::Serialize;

use super::ParameterBinding;
use crate::models::{ParamValue, ParameterBag, ParameterDescriptor};

/// Getter and setter names derived from a parameter key
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AccessorPair {
    pub key: String,
    pub stem: String,
    pub getter: String,
    pub setter: String,
}

/// Stateless resolver for parameter accessors
#[derive(Clone, Copy, Debug, Default)]
pub struct AccessorResolver;

impl AccessorResolver {
    /// Normalize a key to capitalized-word form (`api_key` -> `ApiKey`).
    ///
    /// Words break at separators, at a lower-to-upper change, and before the
    /// last capital of an acronym (`APIKey` -> `ApiKey`).
    pub fn stem(key: &str) -> String {
        let chars: Vec<char> = key.chars().collect();
        let mut stem = String::with_capacity(key.len());
        let mut start_word = true;
        let mut prev_lower = false;
        let mut prev_upper = false;

        for (i, &c) in chars.iter().enumerate() {
            if !c.is_alphanumeric() {
                start_word = true;
                prev_lower = false;
                prev_upper = false;
                continue;
            }
            if c.is_uppercase() {
                let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                if prev_lower || (prev_upper && next_lower) {
                    start_word = true;
                }
            }
            if start_word {
                stem.extend(c.to_uppercase());
                start_word = false;
            } else {
                stem.extend(c.to_lowercase());
            }
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
            prev_upper = c.is_uppercase();
        }

        stem
    }

    pub fn resolve(key: &str) -> AccessorPair {
        let stem = Self::stem(key);
        AccessorPair {
            key: key.to_string(),
            getter: format!("get{stem}"),
            setter: format!("set{stem}"),
            stem,
        }
    }

    /// Build descriptors for every declared default parameter, in order
    pub fn describe(defaults: &ParameterBag) -> Vec<ParameterDescriptor> {
        defaults
            .iter()
            .map(|(key, value)| {
                let pair = Self::resolve(key);
                ParameterDescriptor {
                    key: pair.key,
                    default_value: value.clone(),
                    getter_name: pair.getter,
                    setter_name: pair.setter,
                }
            })
            .collect()
    }

    /// Find the binding that serves `key`
    pub fn find_binding<'a, G>(
        bindings: &'a [ParameterBinding<G>],
        key: &str,
    ) -> Option<&'a ParameterBinding<G>> {
        let stem = Self::stem(key);
        bindings.iter().find(|b| Self::stem(b.key) == stem)
    }

    /// Find the request-side value exposed for `key`
    pub fn find_in_bag<'a>(bag: &'a ParameterBag, key: &str) -> Option<&'a ParamValue> {
        if let Some(value) = bag.get(key) {
            return Some(value);
        }
        let stem = Self::stem(key);
        bag.iter()
            .find(|(k, _)| Self::stem(k) == stem)
            .map(|(_, v)| v)
    }
}
