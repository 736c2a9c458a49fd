//! Identifier factory.
//!
//! Every call to [`Identifiers::mint`] appends a fresh slot to the arena and
//! hands back its index as an [`Identifier`]. Slots are never reused, and each
//! arena carries a process-unique tag that is part of every handle it mints,
//! so equal handles always refer to the same minted instance even across
//! realms.
//!
//! The arena is seeded with the well-known identifiers. Their handles carry a
//! shared tag, so they are the same constants in every arena.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};
use crate::well_known::WellKnown;

/// Tag of the well-known handles. Arenas draw their own tags from 1 upward.
const WELL_KNOWN_ARENA: u64 = 0;

static NEXT_ARENA: AtomicU64 = AtomicU64::new(WELL_KNOWN_ARENA + 1);

/// A lightweight, identity-compared handle to a minted identifier.
///
/// Identifiers from one arena are ordered by mint order. There is no
/// `Display` impl: use [`Identifiers::render`] to obtain a string form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Identifier {
    arena: u64,
    index: u32,
}

impl Identifier {
    /// Slot index within the minting arena, for serialization/debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.index
    }

    #[inline]
    pub(crate) const fn preminted(index: u32) -> Self {
        Self {
            arena: WELL_KNOWN_ARENA,
            index,
        }
    }

    /// The well-known identifier this handle stands for, if any.
    pub fn well_known(self) -> Option<WellKnown> {
        WellKnown::ALL
            .iter()
            .copied()
            .find(|wk| wk.identifier() == self)
    }
}

/// How the factory was reached from a calling expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invocation {
    /// Plain call: `Identifier("desc")`.
    Call,
    /// Construction: `new Identifier("desc")`. Always rejected.
    Construct,
}

#[derive(Debug, Clone)]
struct Slot {
    description: Option<String>,
}

/// Arena of minted identifiers.
///
/// Not `Clone`: a copy would share the tag and mint handles equal to the
/// original's.
#[derive(Debug)]
pub struct Identifiers {
    arena: u64,
    slots: Vec<Slot>,
}

impl Default for Identifiers {
    fn default() -> Self {
        let slots = WellKnown::ALL
            .iter()
            .map(|wk| Slot {
                description: Some(wk.description().to_owned()),
            })
            .collect();
        Self {
            arena: NEXT_ARENA.fetch_add(1, Ordering::Relaxed),
            slots,
        }
    }
}

impl Identifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new identifier. Never deduplicates by description.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` identifiers.
    pub fn mint(&mut self, description: Option<&str>) -> Identifier {
        let index = u32::try_from(self.slots.len()).expect("identifier arena exhausted");
        self.slots.push(Slot {
            description: description.map(str::to_owned),
        });
        Identifier {
            arena: self.arena,
            index,
        }
    }

    /// Mint through a calling expression. Construction is refused before
    /// anything is allocated.
    pub fn invoke(&mut self, invocation: Invocation, description: Option<&str>) -> Result<Identifier> {
        match invocation {
            Invocation::Call => Ok(self.mint(description)),
            Invocation::Construct => Err(Error::InvalidConstruction),
        }
    }

    /// Whether `id` was minted by this arena or is well-known.
    #[inline]
    pub fn contains(&self, id: Identifier) -> bool {
        self.slot(id).is_some()
    }

    fn slot(&self, id: Identifier) -> Option<&Slot> {
        let owned = match id.arena {
            WELL_KNOWN_ARENA => (id.index as usize) < WellKnown::ALL.len(),
            arena => arena == self.arena,
        };
        if !owned {
            return None;
        }
        self.slots.get(id.index as usize)
    }

    /// Description attached at mint time.
    ///
    /// Returns `None` both for identifiers minted without a description and
    /// for handles this arena never minted; [`contains`](Self::contains)
    /// tells them apart.
    #[inline]
    pub fn description(&self, id: Identifier) -> Option<&str> {
        self.slot(id).and_then(|slot| slot.description.as_deref())
    }

    /// Display form: `Identifier(<description>)`, empty parens when
    /// undescribed. `None` for handles this arena never minted.
    pub fn render(&self, id: Identifier) -> Option<String> {
        let slot = self.slot(id)?;
        Some(format!(
            "Identifier({})",
            slot.description.as_deref().unwrap_or("")
        ))
    }

    /// Number of minted identifiers, well-known ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: the well-known identifiers are present from the start.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over all identifiers in mint order with their descriptions.
    pub fn iter(&self) -> impl Iterator<Item = (Identifier, Option<&str>)> {
        self.slots
            .iter()
            .zip(0u32..)
            .map(|(slot, index)| {
                let id = match WellKnown::ALL.get(index as usize) {
                    Some(wk) => wk.identifier(),
                    None => Identifier {
                        arena: self.arena,
                        index,
                    },
                };
                (id, slot.description.as_deref())
            })
    }
}
