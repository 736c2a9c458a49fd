//! Property maps whose keys may be strings or identifiers.

use indexmap::IndexMap;

use crate::identifier::Identifier;

/// Key of an object property.
///
/// Identifier keys compare by identity: two identifiers with equal
/// descriptions are still distinct keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(String),
    Identifier(Identifier),
}

impl PropertyKey {
    pub fn as_identifier(&self) -> Option<Identifier> {
        match self {
            PropertyKey::Identifier(id) => Some(*id),
            PropertyKey::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyKey::String(s) => Some(s.as_str()),
            PropertyKey::Identifier(_) => None,
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::String(s.to_owned())
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::String(s)
    }
}

impl From<Identifier> for PropertyKey {
    fn from(id: Identifier) -> Self {
        PropertyKey::Identifier(id)
    }
}

/// Insertion-ordered property map.
///
/// Overwriting an existing key keeps its original position; removal shifts
/// later entries down so enumeration order stays insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyMap<V> {
    entries: IndexMap<PropertyKey, V>,
}

impl<V> Default for PropertyMap<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V> PropertyMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite, returning the previous value.
    pub fn insert(&mut self, key: impl Into<PropertyKey>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &PropertyKey) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &PropertyKey) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &PropertyKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &PropertyKey) -> Option<V> {
        self.entries.shift_remove(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PropertyKey, &V)> {
        self.entries.iter()
    }

    /// Identifier-keyed entries only, in insertion order. Empty when the map
    /// has none.
    pub fn own_identifier_keys(&self) -> Vec<Identifier> {
        self.entries
            .keys()
            .filter_map(PropertyKey::as_identifier)
            .collect()
    }

    /// String-keyed entries only, in insertion order.
    pub fn own_string_keys(&self) -> Vec<&str> {
        self.entries.keys().filter_map(PropertyKey::as_str).collect()
    }
}

impl<K: Into<PropertyKey>, V> FromIterator<(K, V)> for PropertyMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
