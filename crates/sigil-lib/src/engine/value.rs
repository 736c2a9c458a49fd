//! Runtime values of watch scripts.

use sigil_core::Identifier;

/// Index of an object on the [`Heap`](super::heap::Heap).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) u32);

impl ObjectId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// A script value.
///
/// Derived equality is strict equality: identifiers and objects compare by
/// handle, and `NaN` is unequal to itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Identifier(Identifier),
    Object(ObjectId),
    Builtin(Builtin),
}

impl Value {
    /// Result of `typeof`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null | Value::Object(_) => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Identifier(_) => "identifier",
            Value::Builtin(_) => "function",
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Truthiness as used by `if` and `!`. Identifiers and objects are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Identifier(_) | Value::Object(_) | Value::Builtin(_) => true,
        }
    }

    pub fn as_identifier(&self) -> Option<Identifier> {
        match self {
            Value::Identifier(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<Identifier> for Value {
    fn from(id: Identifier) -> Self {
        Value::Identifier(id)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Option<&str>> for Value {
    fn from(s: Option<&str>) -> Self {
        s.map_or(Value::Undefined, Value::from)
    }
}

/// Native functions reachable from scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `Identifier(desc)`
    IdentifierFactory,
    /// `Identifier.for(key)`
    IdentifierFor,
    /// `Identifier.keyFor(id)`
    IdentifierKeyFor,
    /// `id.toString()`
    IdentifierToString,
    /// `Object(x)`
    ObjectFactory,
    /// `Object.getOwnPropertySymbols(o)`
    ObjectGetOwnPropertySymbols,
    /// `Object.keys(o)`
    ObjectKeys,
    /// `String(x)`
    StringFactory,
}

impl Builtin {
    /// Globals installed in every script scope.
    pub const GLOBALS: [Builtin; 3] = [
        Builtin::IdentifierFactory,
        Builtin::ObjectFactory,
        Builtin::StringFactory,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::IdentifierFactory => "Identifier",
            Builtin::IdentifierFor => "for",
            Builtin::IdentifierKeyFor => "keyFor",
            Builtin::IdentifierToString => "toString",
            Builtin::ObjectFactory => "Object",
            Builtin::ObjectGetOwnPropertySymbols => "getOwnPropertySymbols",
            Builtin::ObjectKeys => "keys",
            Builtin::StringFactory => "String",
        }
    }

    /// Static member of a builtin namespace (`Identifier.for`).
    pub fn static_member(self, name: &str) -> Option<Value> {
        let member = match (self, name) {
            (Builtin::IdentifierFactory, "for") => Builtin::IdentifierFor,
            (Builtin::IdentifierFactory, "keyFor") => Builtin::IdentifierKeyFor,
            (Builtin::IdentifierFactory, name) => {
                return sigil_core::WellKnown::from_name(name)
                    .map(|wk| Value::Identifier(wk.identifier()));
            }
            (Builtin::ObjectFactory, "getOwnPropertySymbols") => {
                Builtin::ObjectGetOwnPropertySymbols
            }
            (Builtin::ObjectFactory, "keys") => Builtin::ObjectKeys,
            _ => return None,
        };
        Some(Value::Builtin(member))
    }
}

/// Number to string, following script conventions: integral values print
/// without a fraction, and `-0` prints as `0`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }
    if n.abs() >= 1e21 {
        return format!("{n:e}").replace('e', "e+");
    }
    if n.abs() < 1e-6 {
        return format!("{n:e}");
    }
    format!("{n}")
}

/// String to number: surrounding whitespace ignored, empty is zero, anything
/// unparsable is `NaN`.
pub fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => f64::NAN,
        _ => trimmed.parse().unwrap_or(f64::NAN),
    }
}
