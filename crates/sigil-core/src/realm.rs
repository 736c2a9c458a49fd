//! The realm: identifier arena, registry, and tracer behind one service object.
//!
//! A realm starts with an empty registry and lives as long as its owner.
//! Tests build their own; long-running hosts can use [`crate::global`].

use crate::error::Result;
use crate::identifier::{Identifier, Identifiers, Invocation};
use crate::registry::{Lookup, Registry};
use crate::trace::{NoopTracer, Tracer};

#[derive(Debug, Default)]
pub struct Realm<T: Tracer = NoopTracer> {
    identifiers: Identifiers,
    registry: Registry,
    tracer: T,
}

impl Realm {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Tracer> Realm<T> {
    pub fn with_tracer(tracer: T) -> Self {
        Self {
            identifiers: Identifiers::new(),
            registry: Registry::new(),
            tracer,
        }
    }

    /// Mint an unregistered identifier.
    pub fn mint(&mut self, description: Option<&str>) -> Identifier {
        let id = self.identifiers.mint(description);
        self.tracer.trace_mint(id, description);
        id
    }

    /// Mint through a calling expression; `Invocation::Construct` fails with
    /// [`crate::Error::InvalidConstruction`].
    pub fn invoke(&mut self, invocation: Invocation, description: Option<&str>) -> Result<Identifier> {
        match self.identifiers.invoke(invocation, description) {
            Ok(id) => {
                self.tracer.trace_mint(id, description);
                Ok(id)
            }
            Err(err) => {
                self.tracer.trace_construct_rejected(description);
                Err(err)
            }
        }
    }

    /// Registry forward lookup, creating on miss.
    pub fn get_or_create(&mut self, key: &str) -> Identifier {
        match self.registry.lookup(&mut self.identifiers, key) {
            Lookup::Hit(id) => {
                self.tracer.trace_registry_hit(key, id);
                id
            }
            Lookup::Created(id) => {
                self.tracer.trace_mint(id, Some(key));
                self.tracer.trace_registry_created(key, id);
                id
            }
        }
    }

    /// Registry reverse lookup. Never creates.
    pub fn key_for(&mut self, id: Identifier) -> Option<&str> {
        let key = self.registry.key_for(id);
        self.tracer.trace_key_for(id, key);
        key
    }

    #[inline]
    pub fn description(&self, id: Identifier) -> Option<&str> {
        self.identifiers.description(id)
    }

    #[inline]
    pub fn render(&self, id: Identifier) -> Option<String> {
        self.identifiers.render(id)
    }

    pub fn identifiers(&self) -> &Identifiers {
        &self.identifiers
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    pub fn tracer_mut(&mut self) -> &mut T {
        &mut self.tracer
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }
}
