use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat key-value bundle of fund attributes reported by a provider.
///
/// Keys follow the provider's own naming (`categoryName`, `beta3Year`, ...).
/// Some entries are nested bundles themselves, e.g. `trailingReturns`, and
/// are addressed with a path. Every lookup is optional: an absent key and a
/// key holding `null` both read as "not supplied".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InfoBundle(Map<String, Value>);

impl InfoBundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by path, descending into nested bundles.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut value = self.0.get(*first)?;
        for key in rest {
            value = value.as_object()?.get(*key)?;
        }
        (!value.is_null()).then_some(value)
    }

    /// Whether a non-null value exists at `path`
    pub fn contains(&self, path: &[&str]) -> bool {
        self.get(path).is_some()
    }

    /// Insert a top-level entry, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for InfoBundle {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for InfoBundle {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
