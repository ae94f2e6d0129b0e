use std::collections::{BTreeMap, HashMap};

/// Keys that steer the query itself and never become equality filters.
pub const RESERVED_KEYS: [&str; 6] = ["search", "sortBy", "sortOrder", "limit", "page", "fields"];

/// Raw query string parameters.
///
/// Ordered so that generated SQL is deterministic for the same input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_reserved(key: &str) -> bool {
        RESERVED_KEYS.contains(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A copy of these params with every reserved key removed.
    pub fn without_reserved(&self) -> Self {
        let mut filters = self.0.clone();
        for key in RESERVED_KEYS {
            filters.remove(key);
        }
        Self(filters)
    }
}

impl From<HashMap<String, String>> for QueryParams {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
