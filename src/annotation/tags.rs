//! The directive mapping and its typed readers.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::syntax::DirectiveSyntax;

/// Directive name → directive value, in insertion order.
///
/// Readers never fail: an absent or unparsable value falls back to the
/// supplied default. Empty mappings serialize as `null`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tags {
    entries: IndexMap<String, String>,
}

impl Tags {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Look up a raw value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set `key` to the comma-joined `values`, replacing any previous value.
    pub fn set<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(",");
        self.entries.insert(key.into(), joined);
    }

    /// Add `value` under `key`, comma-joining onto an existing value.
    pub fn append(&mut self, key: impl Into<String>, value: &str) {
        self.entries
            .entry(key.into())
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_owned());
    }

    /// Overwrite this mapping with every key of `other`.
    pub fn merge_from(&mut self, other: &Tags) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Combine two mappings; keys of `other` win.
    pub fn merge(mut self, other: &Tags) -> Tags {
        self.merge_from(other);
        self
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether any key contains `word` as a substring.
    pub fn contains(&self, word: &str) -> bool {
        self.entries.keys().any(|key| key.contains(word))
    }

    /// The value for `key`, or `default` when absent.
    pub fn value<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// The value for `key` parsed as an integer, or `default`.
    pub fn value_int(&self, key: &str, default: i64) -> i64 {
        self.get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// The value for `key` parsed as a boolean, or `default`.
    ///
    /// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
    pub fn value_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(parse_bool).unwrap_or(default)
    }

    /// Split the value for `key` into an index of distinct items.
    ///
    /// Each item maps to the position of its last occurrence. An empty value
    /// yields an empty index.
    pub fn to_keys(&self, key: &str, separator: &str, default: &str) -> IndexMap<String, usize> {
        let value = self.value(key, default);
        if value.is_empty() {
            return IndexMap::new();
        }
        if separator.is_empty() {
            return IndexMap::from([(value.to_owned(), 0)]);
        }
        let mut index = IndexMap::new();
        for (position, item) in value.split(separator).enumerate() {
            index.insert(item.to_owned(), position);
        }
        index
    }

    /// Split the value for `key` into pairs on `separator`, then each pair on
    /// `splitter`. Pairs that do not split into exactly two parts are dropped.
    pub fn to_map(
        &self,
        key: &str,
        separator: &str,
        splitter: &str,
        default: &str,
    ) -> IndexMap<String, String> {
        let value = self.value(key, default);
        if value.is_empty() || separator.is_empty() || splitter.is_empty() {
            return IndexMap::new();
        }
        value
            .split(separator)
            .filter_map(|pair| {
                let mut parts = pair.split(splitter);
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(k), Some(v), None) => Some((k.to_owned(), v.to_owned())),
                    _ => None,
                }
            })
            .collect()
    }

    /// Every key under the `prefix.` namespace, with the prefix stripped.
    pub fn sub(&self, prefix: &str) -> Tags {
        let prefix = format!("{prefix}.");
        self.entries
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(prefix.as_str())
                    .map(|rest| (rest.to_owned(), value.clone()))
            })
            .collect()
    }

    /// Re-emit as `// @tg key=value` lines.
    pub fn to_docs(&self) -> Vec<String> {
        DirectiveSyntax::DEFAULT.to_docs(self)
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Tags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.entries.is_empty() {
            serializer.serialize_none()
        } else {
            self.entries.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Option::<IndexMap<String, String>>::deserialize(deserializer)?;
        Ok(Self {
            entries: entries.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tags {
        [
            ("validate", "true"),
            ("max", "10"),
            ("http.method", "GET"),
            ("http.path", "/users"),
            ("methods", "get,post,get"),
            ("headers", "a:1;b:2;bad;c:3:4"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_typed_readers() {
        let tags = sample();

        assert!(tags.value_bool("validate", false));
        assert_eq!(tags.value_int("max", 0), 10);
        assert_eq!(tags.value_int("missing", 5), 5);
        assert_eq!(tags.value_int("validate", 7), 7);
        assert!(!tags.value_bool("max", false));
        assert_eq!(tags.value("http.method", "POST"), "GET");
        assert_eq!(tags.value("missing", "POST"), "POST");
    }

    #[test]
    fn test_to_keys() {
        let keys = sample().to_keys("methods", ",", "");
        assert_eq!(keys.len(), 2);
        assert_eq!(keys["get"], 2);
        assert_eq!(keys["post"], 1);

        assert!(sample().to_keys("missing", ",", "").is_empty());
        assert_eq!(sample().to_keys("missing", ",", "x,y").len(), 2);
    }

    #[test]
    fn test_to_map() {
        let map = sample().to_map("headers", ";", ":", "");
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "1");
        assert_eq!(map["b"], "2");
    }

    #[test]
    fn test_sub() {
        let http = sample().sub("http");
        assert_eq!(http.len(), 2);
        assert_eq!(http.get("method"), Some("GET"));
        assert_eq!(http.get("path"), Some("/users"));
        assert!(sample().sub("ht").is_empty());
    }

    #[test]
    fn test_set_and_append() {
        let mut tags = Tags::new();
        tags.set("list", ["a", "b"]);
        assert_eq!(tags.get("list"), Some("a,b"));

        tags.append("list", "c");
        tags.append("other", "x");
        assert_eq!(tags.get("list"), Some("a,b,c"));
        assert_eq!(tags.get("other"), Some("x"));
    }

    #[test]
    fn test_merge_is_right_biased() {
        let a: Tags = [("k", "a"), ("only_a", "1")].into_iter().collect();
        let b: Tags = [("k", "b")].into_iter().collect();
        let c: Tags = [("k", "c"), ("only_c", "3")].into_iter().collect();

        let merged = Tags::new().merge(&a).merge(&b).merge(&c);
        assert_eq!(merged.get("k"), Some("c"));
        assert_eq!(merged.get("only_a"), Some("1"));
        assert_eq!(merged.get("only_c"), Some("3"));

        let merged = c.merge(&a);
        assert_eq!(merged.get("k"), Some("a"));
    }

    #[test]
    fn test_is_set_and_contains() {
        let tags = sample();
        assert!(tags.is_set("max"));
        assert!(!tags.is_set("http"));
        assert!(tags.contains("http"));
        assert!(!tags.contains("nope"));
    }

    #[test]
    fn test_serde_empty_is_null() {
        assert_eq!(serde_json::to_string(&Tags::new()).unwrap(), "null");

        let tags: Tags = serde_json::from_str("null").unwrap();
        assert!(tags.is_empty());

        let tags: Tags = serde_json::from_str(r#"{"b":"2","a":"1"}"#).unwrap();
        assert_eq!(tags.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
