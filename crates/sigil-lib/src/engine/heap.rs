//! Object storage and value inspection.
//!
//! Objects live in an append-only arena and are referenced by [`ObjectId`].
//! Script code only ever creates objects, so nothing is collected; the heap
//! is dropped with its interpreter.

use std::collections::HashSet;

use sigil_core::{Identifier, Identifiers, PropertyKey, PropertyMap};

use super::value::{ObjectId, Value, format_number};

/// Nesting depth past which inspection prints `[Object]` / `[Array]`.
const INSPECT_DEPTH: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Ordinary,
    Array(Vec<Value>),
    /// Result of `Object(id)`: an object that boxes an identifier.
    IdentifierWrapper(Identifier),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeapObject {
    pub kind: ObjectKind,
    pub properties: PropertyMap<Value>,
}

impl HeapObject {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            properties: PropertyMap::new(),
        }
    }

    /// The boxed identifier of a wrapper object.
    pub fn wrapped_identifier(&self) -> Option<Identifier> {
        match self.kind {
            ObjectKind::IdentifierWrapper(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match &self.kind {
            ObjectKind::Array(items) => Some(items),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Heap {
    objects: Vec<HeapObject>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics once `u32::MAX` objects exist. Every allocation a script makes
    /// costs execution fuel, which is itself a `u32`.
    pub fn alloc(&mut self, object: HeapObject) -> ObjectId {
        let id = ObjectId(u32::try_from(self.objects.len()).expect("object heap exhausted"));
        self.objects.push(object);
        id
    }

    pub fn alloc_array(&mut self, items: Vec<Value>) -> ObjectId {
        self.alloc(HeapObject::new(ObjectKind::Array(items)))
    }

    pub fn alloc_object(&mut self, properties: PropertyMap<Value>) -> ObjectId {
        self.alloc(HeapObject {
            kind: ObjectKind::Ordinary,
            properties,
        })
    }

    /// Handles only come from [`Heap::alloc`], so lookups cannot miss.
    pub fn get(&self, id: ObjectId) -> &HeapObject {
        &self.objects[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: ObjectId) -> &mut HeapObject {
        &mut self.objects[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Debug rendering of a value, as shown in the watch log.
    pub fn inspect(&self, value: &Value, identifiers: &Identifiers) -> String {
        let mut out = String::new();
        Inspector {
            heap: self,
            identifiers,
            visiting: HashSet::new(),
        }
        .value(&mut out, value, 0);
        out
    }
}

struct Inspector<'a> {
    heap: &'a Heap,
    identifiers: &'a Identifiers,
    visiting: HashSet<ObjectId>,
}

impl Inspector<'_> {
    fn value(&mut self, out: &mut String, value: &Value, depth: usize) {
        match value {
            Value::Undefined => out.push_str("undefined"),
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => out.push_str(&format_number(*n)),
            Value::String(s) => out.push_str(&format!("{s:?}")),
            Value::Identifier(id) => out.push_str(&render_identifier(self.identifiers, *id)),
            Value::Builtin(b) => {
                out.push_str("[Function: ");
                out.push_str(b.name());
                out.push(']');
            }
            Value::Object(id) => self.object(out, *id, depth),
        }
    }

    fn object(&mut self, out: &mut String, id: ObjectId, depth: usize) {
        if self.visiting.contains(&id) {
            out.push_str("[Circular]");
            return;
        }
        let heap = self.heap;
        let object = heap.get(id);
        if depth >= INSPECT_DEPTH {
            out.push_str(match object.kind {
                ObjectKind::Array(_) => "[Array]",
                _ => "[Object]",
            });
            return;
        }

        self.visiting.insert(id);
        let (open, close, mut parts) = match &object.kind {
            ObjectKind::Ordinary => ("{", "}", Vec::new()),
            ObjectKind::Array(items) => {
                let parts = items
                    .iter()
                    .map(|item| {
                        let mut part = String::new();
                        self.value(&mut part, item, depth + 1);
                        part
                    })
                    .collect();
                ("[", "]", parts)
            }
            ObjectKind::IdentifierWrapper(wrapped) => {
                out.push_str("[Identifier: ");
                out.push_str(&render_identifier(self.identifiers, *wrapped));
                out.push(']');
                if object.properties.is_empty() {
                    self.visiting.remove(&id);
                    return;
                }
                out.push(' ');
                ("{", "}", Vec::new())
            }
        };

        for (key, value) in object.properties.iter() {
            let mut part = match key {
                PropertyKey::String(name) => property_name(name),
                PropertyKey::Identifier(key) => {
                    format!("[{}]", render_identifier(self.identifiers, *key))
                }
            };
            part.push_str(": ");
            self.value(&mut part, value, depth + 1);
            parts.push(part);
        }
        self.visiting.remove(&id);

        if parts.is_empty() {
            out.push_str(open);
            out.push_str(close);
            return;
        }
        let inner = parts.join(", ");
        if open == "{" {
            out.push_str(&format!("{{ {inner} }}"));
        } else {
            out.push_str(&format!("[{inner}]"));
        }
    }
}

/// `Identifier(desc)` text for an identifier the script reached.
///
/// Every identifier a script can reach belongs to its realm; a foreign
/// handle renders without its description.
pub(crate) fn render_identifier(identifiers: &Identifiers, id: Identifier) -> String {
    identifiers
        .render(id)
        .unwrap_or_else(|| "Identifier(?)".to_owned())
}

/// Bare name when it reads as one, quoted otherwise.
fn property_name(name: &str) -> String {
    let mut chars = name.chars();
    let bare = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if bare {
        name.to_owned()
    } else {
        format!("{name:?}")
    }
}
