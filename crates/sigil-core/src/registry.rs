//! Global identifier registry.
//!
//! Maps string keys to identifiers minted on first request. Forward lookup
//! either finds or creates; reverse lookup only finds.
//!
//! Records are kept in creation order and never evicted.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::identifier::{Identifier, Identifiers};

/// Registry of keyed identifiers. Owns no identifiers itself: minting goes
/// through the caller-supplied [`Identifiers`] arena.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Key to identifier, in creation order.
    by_key: IndexMap<String, Identifier>,
    /// Identifier to record position in `by_key`.
    by_identifier: HashMap<Identifier, usize>,
}

/// Outcome of a forward lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The key already had a record.
    Hit(Identifier),
    /// A new identifier was minted and recorded.
    Created(Identifier),
}

impl Lookup {
    #[inline]
    pub fn identifier(self) -> Identifier {
        match self {
            Lookup::Hit(id) | Lookup::Created(id) => id,
        }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the identifier recorded for `key`, minting one (described by the
    /// key) when none exists.
    pub fn get_or_create(&mut self, identifiers: &mut Identifiers, key: &str) -> Identifier {
        self.lookup(identifiers, key).identifier()
    }

    /// Like [`Registry::get_or_create`], reporting whether a record was created.
    pub fn lookup(&mut self, identifiers: &mut Identifiers, key: &str) -> Lookup {
        if let Some(&id) = self.by_key.get(key) {
            return Lookup::Hit(id);
        }
        let id = identifiers.mint(Some(key));
        let (index, _) = self.by_key.insert_full(key.to_owned(), id);
        self.by_identifier.insert(id, index);
        Lookup::Created(id)
    }

    /// Forward lookup without creating.
    #[inline]
    pub fn get(&self, key: &str) -> Option<Identifier> {
        self.by_key.get(key).copied()
    }

    /// Reverse lookup. `None` for identifiers that were not produced by
    /// [`Registry::get_or_create`], including the well-known ones.
    #[inline]
    pub fn key_for(&self, id: Identifier) -> Option<&str> {
        let &index = self.by_identifier.get(&id)?;
        self.by_key.get_index(index).map(|(key, _)| key.as_str())
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Iterate over records in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Identifier)> {
        self.by_key.iter().map(|(key, &id)| (key.as_str(), id))
    }
}

/// Serializes as `{ key: raw_identifier, ... }` in creation order.
impl Serialize for Registry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.by_key.len()))?;
        for (key, id) in self.iter() {
            map.serialize_entry(key, &id.as_u32())?;
        }
        map.end()
    }
}
