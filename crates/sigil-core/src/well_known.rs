//! Well-known identifiers.
//!
//! Pre-minted at fixed arena slots and never registered under a key, so
//! `Registry::key_for` reports them as not found.

use crate::identifier::Identifier;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WellKnown {
    /// Default-iteration hook consulted by `for...of`.
    Iterator,
}

impl WellKnown {
    /// Every well-known identifier, in slot order.
    pub const ALL: &'static [WellKnown] = &[WellKnown::Iterator];

    pub const fn identifier(self) -> Identifier {
        match self {
            WellKnown::Iterator => Identifier::preminted(0),
        }
    }

    /// Property name on the factory object, e.g. `iterator`.
    pub const fn name(self) -> &'static str {
        match self {
            WellKnown::Iterator => "iterator",
        }
    }

    /// Description carried by the pre-minted identifier.
    pub const fn description(self) -> &'static str {
        match self {
            WellKnown::Iterator => "Identifier.iterator",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|wk| wk.name() == name)
    }
}

impl Identifier {
    /// The default-iteration hook.
    pub const ITERATOR: Identifier = WellKnown::Iterator.identifier();
}
