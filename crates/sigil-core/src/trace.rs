//! Tracing hooks for realm operations.
//!
//! `NoopTracer` methods are empty `#[inline(always)]` functions, so an
//! untraced realm pays nothing. `PrintTracer` formats each event into a line
//! and keeps the lines for the caller to print.

use crate::Colors;
use crate::identifier::Identifier;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Registry creations and rejected constructions.
    #[default]
    Default,
    /// (-v): every mint, registry hit, and reverse lookup.
    Verbose,
    /// (-vv): as verbose, with raw handle numbers.
    VeryVerbose,
}

impl Verbosity {
    /// Map a `-v` count to a level.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        }
    }
}

/// Realm instrumentation.
///
/// Each method is called once the operation it describes has completed:
/// - `trace_mint` - factory produced a new identifier
/// - `trace_construct_rejected` - factory reached through `new`
/// - `trace_registry_hit` - `get_or_create` found an existing record
/// - `trace_registry_created` - `get_or_create` minted and recorded
/// - `trace_key_for` - reverse lookup finished, `key` is `None` when not found
pub trait Tracer {
    fn trace_mint(&mut self, id: Identifier, description: Option<&str>);

    fn trace_construct_rejected(&mut self, description: Option<&str>);

    fn trace_registry_hit(&mut self, key: &str, id: Identifier);

    fn trace_registry_created(&mut self, key: &str, id: Identifier);

    fn trace_key_for(&mut self, id: Identifier, key: Option<&str>);
}

/// No-op tracer that gets optimized away completely.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_mint(&mut self, _id: Identifier, _description: Option<&str>) {}

    #[inline(always)]
    fn trace_construct_rejected(&mut self, _description: Option<&str>) {}

    #[inline(always)]
    fn trace_registry_hit(&mut self, _key: &str, _id: Identifier) {}

    #[inline(always)]
    fn trace_registry_created(&mut self, _key: &str, _id: Identifier) {}

    #[inline(always)]
    fn trace_key_for(&mut self, _id: Identifier, _key: Option<&str>) {}
}

/// Tracer that collects formatted lines.
#[derive(Clone, Debug, Default)]
pub struct PrintTracer {
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Print collected lines to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{line}");
        }
    }

    fn verbose(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }

    fn handle(&self, id: Identifier) -> String {
        if self.verbosity == Verbosity::VeryVerbose {
            format!(" {}#{}{}", self.colors.dim, id.as_u32(), self.colors.reset)
        } else {
            String::new()
        }
    }

    fn push(&mut self, op: &str, detail: String) {
        let c = self.colors;
        self.lines
            .push(format!("{}{op:<8}{} {detail}", c.blue, c.reset));
    }

    fn quoted(&self, text: &str) -> String {
        let c = self.colors;
        format!("{}{text:?}{}", c.green, c.reset)
    }
}

impl Tracer for PrintTracer {
    fn trace_mint(&mut self, id: Identifier, description: Option<&str>) {
        if !self.verbose() {
            return;
        }
        let desc = description.map_or_else(|| "-".to_owned(), |d| self.quoted(d));
        let handle = self.handle(id);
        self.push("mint", format!("{desc}{handle}"));
    }

    fn trace_construct_rejected(&mut self, description: Option<&str>) {
        let desc = description.map_or_else(|| "-".to_owned(), |d| self.quoted(d));
        let c = self.colors;
        self.push("new", format!("{desc} {}rejected{}", c.red, c.reset));
    }

    fn trace_registry_hit(&mut self, key: &str, id: Identifier) {
        if !self.verbose() {
            return;
        }
        let key = self.quoted(key);
        let handle = self.handle(id);
        self.push("for", format!("{key} hit{handle}"));
    }

    fn trace_registry_created(&mut self, key: &str, id: Identifier) {
        let key = self.quoted(key);
        let handle = self.handle(id);
        self.push("for", format!("{key} created{handle}"));
    }

    fn trace_key_for(&mut self, id: Identifier, key: Option<&str>) {
        if !self.verbose() {
            return;
        }
        let found = match key {
            Some(key) => self.quoted(key),
            None => "not found".to_owned(),
        };
        let handle = self.handle(id);
        self.push("keyFor", format!("{found}{handle}"));
    }
}
