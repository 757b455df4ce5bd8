//! Ordered key/value parameter store.
//!
//! Each parameter becomes two positional arguments, `key` then `value`, when
//! the process is launched. Pairs keep their insertion order; setting a key
//! that already exists replaces its value in place.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value for `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Flatten into the launch argument list: `key1, value1, key2, value2, ...`
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.entries.len() * 2);
        for (key, value) in &self.entries {
            args.push(key.clone());
            args.push(value.clone());
        }
        args
    }
}

impl<K, V> Extend<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        params.extend(iter);
        params
    }
}

impl Serialize for Params {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ParamsVisitor)
    }
}

struct ParamsVisitor;

impl<'de> Visitor<'de> for ParamsVisitor {
    type Value = Params;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of parameter names to values")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut params = Params::new();
        while let Some((key, value)) = access.next_entry::<Scalar, Scalar>()? {
            params.set(key.0, value.0);
        }
        Ok(params)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Params::new())
    }
}

/// A scalar read as its textual form, so `--count: 3` yields the argument `3`.
struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            // `--verbose:` with nothing after it
            fn visit_unit<E: de::Error>(self) -> Result<Scalar, E> {
                Ok(Scalar(String::new()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_args_pair_each_key_with_its_value() {
        let params: Params = [("--name", "echo"), ("--count", "3"), ("-v", "")]
            .into_iter()
            .collect();

        let args = params.to_args();
        assert_eq!(args.len(), 2 * params.len());
        for pair in args.chunks(2) {
            assert_eq!(params.get(&pair[0]), Some(pair[1].as_str()));
        }
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = Params::new();
        params.set("--a", "1");
        params.set("--b", "2");
        params.set("--a", "3");

        assert_eq!(params.len(), 2);
        assert_eq!(params.to_args(), vec!["--a", "3", "--b", "2"]);
    }

    #[test]
    fn test_extend_from_hash_map() {
        let mut source = HashMap::new();
        source.insert("--x".to_string(), "1".to_string());
        source.insert("--y".to_string(), "2".to_string());

        let mut params = Params::new();
        params.extend(source.clone());

        assert_eq!(params.len(), 2);
        for (key, value) in &source {
            assert_eq!(params.get(key), Some(value.as_str()));
        }
    }

    #[test]
    fn test_iter_yields_pairs_in_insertion_order() {
        let mut params = Params::new();
        params.set("--second", "b");
        params.set("--first", "a");
        params.set("--second", "c");

        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(pairs, vec![("--second", "c"), ("--first", "a")]);
    }

    #[test]
    fn test_empty_params_produce_no_args() {
        let params = Params::new();
        assert!(params.is_empty());
        assert!(params.to_args().is_empty());
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let yaml = "--zeta: last\n--alpha: 1\n--flag: true\n--empty:\n";
        let params: Params = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(
            params.to_args(),
            vec!["--zeta", "last", "--alpha", "1", "--flag", "true", "--empty", ""]
        );
    }
}
