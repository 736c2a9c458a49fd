//! Tree-walking evaluator for watch scripts.
//!
//! Executes a parsed [`Program`] statement by statement against a
//! [`Realm`], recording a [`Watch`] for every expression statement.
//! Evaluation stops at the first runtime error; the watches recorded up to
//! that point are kept.

use std::collections::HashMap;

use sigil_core::{Identifier, Invocation, NoopTracer, PropertyKey, PropertyMap, Realm, Tracer};

use super::error::RuntimeError;
use super::heap::{Heap, HeapObject, ObjectKind, render_identifier};
use super::value::{Builtin, ObjectId, Value, format_number, parse_number};
use super::watch::{Evaluation, Watch};
use crate::Span;
use crate::parser::{BinaryOp, DeclKind, Expr, ExprKind, Program, PropName, Stmt, StmtKind, UnaryOp};

/// Default execution fuel (statements plus expressions evaluated).
pub const DEFAULT_EXEC_FUEL: u32 = 1_000_000;
/// Default recursion fuel (nesting of statements and expressions).
pub const DEFAULT_RECURSION_FUEL: u32 = 256;
/// Largest array index; bigger indices are ordinary string keys.
const MAX_ARRAY_INDEX: usize = u32::MAX as usize - 1;

type EvalResult<T> = Result<T, RuntimeError>;

/// Evaluation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuelLimits {
    pub exec_fuel: u32,
    pub recursion_limit: u32,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: DEFAULT_EXEC_FUEL,
            recursion_limit: DEFAULT_RECURSION_FUEL,
        }
    }
}

impl FuelLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }
}

#[derive(Debug, Clone)]
struct Binding {
    value: Value,
    kind: DeclKind,
}

#[derive(Debug, Default)]
struct Scope {
    bindings: HashMap<String, Binding>,
}

/// Script interpreter borrowing a realm for identifier and registry state.
///
/// Bindings and objects belong to the interpreter; identifiers and registry
/// records belong to the realm and outlive it.
pub struct Interpreter<'r, 's, T: Tracer = NoopTracer> {
    realm: &'r mut Realm<T>,
    source: &'s str,
    heap: Heap,
    /// Innermost last. Index 0 is the script scope, where `var` binds.
    scopes: Vec<Scope>,
    watches: Vec<Watch>,
    exec_fuel: u32,
    recursion_limit: u32,
    depth: u32,
    error_span: Option<Span>,
}

impl<'r, 's, T: Tracer> Interpreter<'r, 's, T> {
    /// `source` is the text the program was parsed from; watch expressions
    /// are sliced out of it.
    pub fn new(realm: &'r mut Realm<T>, source: &'s str) -> Self {
        let limits = FuelLimits::default();
        Self {
            realm,
            source,
            heap: Heap::new(),
            scopes: vec![Scope::default()],
            watches: Vec::new(),
            exec_fuel: limits.exec_fuel,
            recursion_limit: limits.recursion_limit,
            depth: 0,
            error_span: None,
        }
    }

    pub fn with_limits(mut self, limits: FuelLimits) -> Self {
        self.exec_fuel = limits.exec_fuel;
        self.recursion_limit = limits.recursion_limit;
        self
    }

    /// Evaluate every statement in order, stopping at the first error.
    pub fn run(&mut self, program: &Program) -> Evaluation {
        self.error_span = None;
        let mut evaluation = Evaluation::default();
        for stmt in &program.stmts {
            if let Err(err) = self.exec_stmt(stmt) {
                evaluation.error = Some(err);
                evaluation.error_span = self.error_span.or(Some(stmt.span));
                break;
            }
        }
        evaluation.watches = std::mem::take(&mut self.watches);
        evaluation
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn realm(&self) -> &Realm<T> {
        &*self.realm
    }

    /// Current value of a name, as a script would read it.
    pub fn binding(&self, name: &str) -> Option<Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.bindings.get(name))
            .map(|binding| binding.value.clone())
            .or_else(|| {
                Builtin::GLOBALS
                    .iter()
                    .find(|builtin| builtin.name() == name)
                    .map(|builtin| Value::Builtin(*builtin))
            })
    }

    pub fn inspect(&self, value: &Value) -> String {
        self.heap.inspect(value, self.realm.identifiers())
    }

    fn tick(&mut self) -> EvalResult<()> {
        if self.exec_fuel == 0 {
            return Err(RuntimeError::ExecFuelExhausted);
        }
        self.exec_fuel -= 1;
        Ok(())
    }

    /// Spend `units` of execution fuel at once, or none if short.
    fn charge(&mut self, units: usize) -> EvalResult<()> {
        let units = u32::try_from(units).map_err(|_| RuntimeError::ExecFuelExhausted)?;
        self.exec_fuel = self
            .exec_fuel
            .checked_sub(units)
            .ok_or(RuntimeError::ExecFuelExhausted)?;
        Ok(())
    }

    /// Run `f` one level deeper, charging execution and recursion fuel.
    fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> EvalResult<R>) -> EvalResult<R> {
        self.tick()?;
        if self.depth >= self.recursion_limit {
            return Err(RuntimeError::RecursionLimitExceeded);
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn with_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> EvalResult<R>) -> EvalResult<R> {
        self.scopes.push(Scope::default());
        let result = f(self);
        self.scopes.pop();
        result
    }

    fn fail_at<R>(&mut self, span: Span, err: RuntimeError) -> EvalResult<R> {
        if self.error_span.is_none() {
            self.error_span = Some(span);
        }
        Err(err)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<()> {
        let result = self.nested(|this| this.exec_stmt_inner(stmt));
        if result.is_err() && self.error_span.is_none() {
            self.error_span = Some(stmt.span);
        }
        result
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt) -> EvalResult<()> {
        match &stmt.kind {
            StmtKind::Declare { kind, name, init } => {
                let value = self.eval_expr(init)?;
                self.declare(*kind, name, value)
            }
            StmtKind::Assign { target, value } => self.assign(target, value),
            StmtKind::Expr(expr) => {
                let value = self.eval_expr(expr)?;
                self.record_watch(expr, &value);
                Ok(())
            }
            StmtKind::If {
                cond,
                then,
                otherwise,
            } => {
                if self.eval_expr(cond)?.is_truthy() {
                    self.exec_stmt(then)
                } else if let Some(otherwise) = otherwise {
                    self.exec_stmt(otherwise)
                } else {
                    Ok(())
                }
            }
            StmtKind::ForOf {
                kind,
                name,
                iterable,
                body,
            } => {
                let value = self.eval_expr(iterable)?;
                let items = match self.iterate(&value) {
                    Some(items) => items,
                    None => {
                        let text = iterable.span.text(self.source);
                        let err = RuntimeError::type_mismatch(format!("{text} is not iterable"));
                        return self.fail_at(iterable.span, err);
                    }
                };
                for item in items {
                    self.with_scope(|this| {
                        this.declare(*kind, name, item)?;
                        this.exec_stmt(body)
                    })?;
                }
                Ok(())
            }
            StmtKind::Block(stmts) => self.with_scope(|this| {
                for stmt in stmts {
                    this.exec_stmt(stmt)?;
                }
                Ok(())
            }),
            StmtKind::Empty => Ok(()),
        }
    }

    fn declare(&mut self, kind: DeclKind, name: &str, value: Value) -> EvalResult<()> {
        let index = match kind {
            DeclKind::Var => 0,
            DeclKind::Let | DeclKind::Const => self.scopes.len() - 1,
        };
        let scope = &mut self.scopes[index];
        let conflict = scope
            .bindings
            .get(name)
            .is_some_and(|existing| kind != DeclKind::Var || existing.kind != DeclKind::Var);
        if conflict {
            return Err(RuntimeError::Redeclared {
                name: name.to_owned(),
            });
        }
        scope
            .bindings
            .insert(name.to_owned(), Binding { value, kind });
        Ok(())
    }

    fn assign(&mut self, target: &Expr, value: &Expr) -> EvalResult<()> {
        match &target.kind {
            ExprKind::Name(name) => {
                let value = self.eval_expr(value)?;
                self.assign_name(name, value)
                    .or_else(|err| self.fail_at(target.span, err))
            }
            ExprKind::Member { object, property } => {
                let object = self.eval_expr(object)?;
                let value = self.eval_expr(value)?;
                self.set_property(&object, PropertyKey::from(property.as_str()), value)
                    .or_else(|err| self.fail_at(target.span, err))
            }
            ExprKind::Index { object, index } => {
                let object = self.eval_expr(object)?;
                let key = self.eval_expr(index)?;
                let key = self.to_property_key(&key)?;
                let value = self.eval_expr(value)?;
                self.set_property(&object, key, value)
                    .or_else(|err| self.fail_at(target.span, err))
            }
            // The parser only produces assignable targets.
            _ => Ok(()),
        }
    }

    fn assign_name(&mut self, name: &str, value: Value) -> EvalResult<()> {
        let binding = self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.bindings.get_mut(name));
        match binding {
            Some(binding) if binding.kind == DeclKind::Const => Err(RuntimeError::type_mismatch(
                "Assignment to constant variable.",
            )),
            Some(binding) => {
                binding.value = value;
                Ok(())
            }
            // Globals can be reassigned; the new value shadows the builtin.
            None if Builtin::GLOBALS.iter().any(|b| b.name() == name) => {
                self.declare(DeclKind::Var, name, value)
            }
            None => Err(RuntimeError::Reference {
                name: name.to_owned(),
            }),
        }
    }

    fn record_watch(&mut self, expr: &Expr, value: &Value) {
        let watch = Watch {
            expression: expr.span.text(self.source).to_owned(),
            value: self.inspect(value),
            type_name: value.type_name().to_owned(),
            span: expr.span,
        };
        self.watches.push(watch);
    }

    fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        let result = self.nested(|this| this.eval_expr_inner(expr));
        if result.is_err() && self.error_span.is_none() {
            self.error_span = Some(expr.span);
        }
        result
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::Undefined => Ok(Value::Undefined),
            ExprKind::Null => Ok(Value::Null),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::Str(s) => Ok(Value::String(s.clone())),
            ExprKind::Name(name) => self.binding(name).ok_or_else(|| RuntimeError::Reference {
                name: name.clone(),
            }),
            ExprKind::Array(elements) => {
                let items = self.eval_list(elements)?;
                Ok(Value::Object(self.heap.alloc_array(items)))
            }
            ExprKind::Object(props) => {
                let mut properties = PropertyMap::new();
                for (name, value) in props {
                    let key = match name {
                        PropName::Named(name) => PropertyKey::from(name.as_str()),
                        PropName::Computed(key) => {
                            let key = self.eval_expr(key)?;
                            self.to_property_key(&key)?
                        }
                    };
                    let value = self.eval_expr(value)?;
                    properties.insert(key, value);
                }
                Ok(Value::Object(self.heap.alloc_object(properties)))
            }
            ExprKind::Member { object, property } => {
                let object = self.eval_expr(object)?;
                self.get_property(&object, &PropertyKey::from(property.as_str()))
            }
            ExprKind::Index { object, index } => {
                let object = self.eval_expr(object)?;
                let key = self.eval_expr(index)?;
                let key = self.to_property_key(&key)?;
                self.get_property(&object, &key)
            }
            ExprKind::Call { callee, args } => {
                let (this, function) = self.eval_callee(callee)?;
                let args = self.eval_list(args)?;
                let Value::Builtin(builtin) = function else {
                    let text = callee.span.text(self.source);
                    return Err(RuntimeError::type_mismatch(format!("{text} is not a function")));
                };
                self.call(builtin, Invocation::Call, &this, &args)
            }
            ExprKind::New { callee, args } => {
                let function = self.eval_expr(callee)?;
                let args = self.eval_list(args)?;
                let Value::Builtin(builtin) = function else {
                    let text = callee.span.text(self.source);
                    return Err(RuntimeError::type_mismatch(format!(
                        "{text} is not a constructor"
                    )));
                };
                self.call(builtin, Invocation::Construct, &Value::Undefined, &args)
            }
            ExprKind::Unary { op, operand } => match op {
                UnaryOp::Typeof => {
                    // `typeof` of an undeclared name is not an error.
                    if let ExprKind::Name(name) = &operand.kind
                        && self.binding(name).is_none()
                    {
                        return Ok(Value::from("undefined"));
                    }
                    let value = self.eval_expr(operand)?;
                    Ok(Value::from(value.type_name()))
                }
                UnaryOp::Not => Ok(Value::Bool(!self.eval_expr(operand)?.is_truthy())),
            },
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.eval_expr(lhs)?;
                let rhs = self.eval_expr(rhs)?;
                match op {
                    BinaryOp::StrictEq => Ok(Value::Bool(lhs == rhs)),
                    BinaryOp::StrictNotEq => Ok(Value::Bool(lhs != rhs)),
                    BinaryOp::LooseEq => Ok(Value::Bool(self.loose_equals(&lhs, &rhs))),
                    BinaryOp::LooseNotEq => Ok(Value::Bool(!self.loose_equals(&lhs, &rhs))),
                    BinaryOp::Add => self.add(&lhs, &rhs),
                }
            }
        }
    }

    fn eval_list(&mut self, exprs: &[Expr]) -> EvalResult<Vec<Value>> {
        exprs.iter().map(|expr| self.eval_expr(expr)).collect()
    }

    /// Evaluate a callee, keeping the receiver of `a.b(...)` and `a[b](...)`.
    fn eval_callee(&mut self, callee: &Expr) -> EvalResult<(Value, Value)> {
        let (this, key) = match &callee.kind {
            ExprKind::Member { object, property } => {
                let this = self.eval_expr(object)?;
                (this, PropertyKey::from(property.as_str()))
            }
            ExprKind::Index { object, index } => {
                let this = self.eval_expr(object)?;
                let key = self.eval_expr(index)?;
                (this, self.to_property_key(&key)?)
            }
            _ => return Ok((Value::Undefined, self.eval_expr(callee)?)),
        };
        let function = self
            .get_property(&this, &key)
            .or_else(|err| self.fail_at(callee.span, err))?;
        Ok((this, function))
    }

    fn call(
        &mut self,
        builtin: Builtin,
        invocation: Invocation,
        this: &Value,
        args: &[Value],
    ) -> EvalResult<Value> {
        let first = args.first().unwrap_or(&Value::Undefined);
        if invocation == Invocation::Construct
            && !matches!(builtin, Builtin::IdentifierFactory | Builtin::ObjectFactory)
        {
            return Err(RuntimeError::type_mismatch(format!(
                "{} is not a constructor",
                builtin.name()
            )));
        }

        match builtin {
            Builtin::IdentifierFactory => {
                // Construction is rejected before the description is converted.
                let description = match (invocation, first) {
                    (_, Value::Undefined) => None,
                    (Invocation::Construct, Value::String(s)) => Some(s.clone()),
                    (Invocation::Construct, _) => None,
                    (Invocation::Call, value) => Some(self.to_string(value)?),
                };
                let id = self.realm.invoke(invocation, description.as_deref())?;
                Ok(Value::Identifier(id))
            }
            Builtin::IdentifierFor => {
                let key = self.to_string(first)?;
                Ok(Value::Identifier(self.realm.get_or_create(&key)))
            }
            Builtin::IdentifierKeyFor => {
                let Value::Identifier(id) = first else {
                    let shown = self.inspect(first);
                    return Err(RuntimeError::type_mismatch(format!(
                        "{shown} is not an identifier"
                    )));
                };
                let key = self.realm.key_for(*id).map(str::to_owned);
                Ok(key.map_or(Value::Undefined, Value::String))
            }
            Builtin::IdentifierToString => match self.this_identifier(this) {
                Some(id) => Ok(Value::String(self.render(id))),
                None => Err(RuntimeError::type_mismatch(
                    "Identifier.prototype.toString requires that 'this' be an Identifier",
                )),
            },
            Builtin::ObjectFactory => Ok(match first {
                Value::Identifier(id) => {
                    let wrapper = HeapObject::new(ObjectKind::IdentifierWrapper(*id));
                    Value::Object(self.heap.alloc(wrapper))
                }
                Value::Object(_) | Value::Builtin(_) => first.clone(),
                _ => Value::Object(self.heap.alloc_object(PropertyMap::new())),
            }),
            Builtin::ObjectGetOwnPropertySymbols => {
                let keys = match first {
                    Value::Undefined | Value::Null => return Err(not_an_object()),
                    Value::Object(id) => self.heap.get(*id).properties.own_identifier_keys(),
                    _ => Vec::new(),
                };
                let items = keys.into_iter().map(Value::Identifier).collect();
                Ok(Value::Object(self.heap.alloc_array(items)))
            }
            Builtin::ObjectKeys => {
                let keys: Vec<Value> = match first {
                    Value::Undefined | Value::Null => return Err(not_an_object()),
                    Value::Object(id) => {
                        let object = self.heap.get(*id);
                        let indices = object.as_array().map_or(0, <[Value]>::len);
                        (0..indices)
                            .map(|i| Value::String(i.to_string()))
                            .chain(
                                object
                                    .properties
                                    .own_string_keys()
                                    .into_iter()
                                    .map(Value::from),
                            )
                            .collect()
                    }
                    Value::String(s) => (0..s.chars().count())
                        .map(|i| Value::String(i.to_string()))
                        .collect(),
                    _ => Vec::new(),
                };
                Ok(Value::Object(self.heap.alloc_array(keys)))
            }
            Builtin::StringFactory => Ok(Value::String(match args.first() {
                None => String::new(),
                Some(Value::Identifier(id)) => self.render(*id),
                Some(value) => self.to_string(value)?,
            })),
        }
    }

    fn render(&self, id: Identifier) -> String {
        render_identifier(self.realm.identifiers(), id)
    }

    fn this_identifier(&self, this: &Value) -> Option<Identifier> {
        match this {
            Value::Identifier(id) => Some(*id),
            Value::Object(id) => self.heap.get(*id).wrapped_identifier(),
            _ => None,
        }
    }

    fn get_property(&self, target: &Value, key: &PropertyKey) -> EvalResult<Value> {
        match target {
            Value::Undefined | Value::Null => Err(RuntimeError::type_mismatch(format!(
                "Cannot read properties of {} (reading '{}')",
                self.inspect(target),
                self.key_text(key)
            ))),
            Value::Identifier(id) => Ok(self.identifier_member(*id, key)),
            Value::String(s) => Ok(match key.as_str() {
                Some("length") => Value::Number(s.chars().count() as f64),
                Some(index) => array_index(index)
                    .and_then(|i| s.chars().nth(i))
                    .map_or(Value::Undefined, |c| Value::String(c.to_string())),
                None => Value::Undefined,
            }),
            Value::Builtin(builtin) => Ok(key
                .as_str()
                .and_then(|name| builtin.static_member(name))
                .unwrap_or(Value::Undefined)),
            Value::Object(id) => Ok(self.object_member(*id, key)),
            Value::Bool(_) | Value::Number(_) => Ok(Value::Undefined),
        }
    }

    fn identifier_member(&self, id: Identifier, key: &PropertyKey) -> Value {
        match key.as_str() {
            Some("toString") => Value::Builtin(Builtin::IdentifierToString),
            Some("description") => Value::from(self.realm.description(id)),
            _ => Value::Undefined,
        }
    }

    fn object_member(&self, id: ObjectId, key: &PropertyKey) -> Value {
        let object = self.heap.get(id);
        if let Some(value) = object.properties.get(key) {
            return value.clone();
        }
        match (&object.kind, key.as_str()) {
            (ObjectKind::Array(items), Some("length")) => Value::Number(items.len() as f64),
            (ObjectKind::Array(items), Some(index)) => array_index(index)
                .and_then(|i| items.get(i))
                .cloned()
                .unwrap_or(Value::Undefined),
            (ObjectKind::IdentifierWrapper(wrapped), _) => self.identifier_member(*wrapped, key),
            _ => Value::Undefined,
        }
    }

    fn set_property(&mut self, target: &Value, key: PropertyKey, value: Value) -> EvalResult<()> {
        match target {
            Value::Undefined | Value::Null => Err(RuntimeError::type_mismatch(format!(
                "Cannot set properties of {} (setting '{}')",
                self.inspect(target),
                self.key_text(&key)
            ))),
            Value::Object(id) => {
                let index = key.as_str().and_then(array_index);
                let len = self.heap.get(*id).as_array().map(<[Value]>::len);
                if let (Some(len), Some(index)) = (len, index) {
                    // Every slot a write grows the array by costs one unit of fuel.
                    self.charge((index + 1).saturating_sub(len))?;
                    if let ObjectKind::Array(items) = &mut self.heap.get_mut(*id).kind {
                        if index >= items.len() {
                            items.resize(index + 1, Value::Undefined);
                        }
                        items[index] = value;
                    }
                    return Ok(());
                }
                self.heap.get_mut(*id).properties.insert(key, value);
                Ok(())
            }
            // Writes to primitives are dropped.
            _ => Ok(()),
        }
    }

    fn key_text(&self, key: &PropertyKey) -> String {
        match key {
            PropertyKey::String(s) => s.clone(),
            PropertyKey::Identifier(id) => self.render(*id),
        }
    }

    fn to_property_key(&self, value: &Value) -> EvalResult<PropertyKey> {
        match value {
            Value::Identifier(id) => Ok(PropertyKey::Identifier(*id)),
            Value::Object(id) => match self.heap.get(*id).wrapped_identifier() {
                Some(wrapped) => Ok(PropertyKey::Identifier(wrapped)),
                None => Ok(PropertyKey::String(self.to_string(value)?)),
            },
            other => Ok(PropertyKey::String(self.to_string(other)?)),
        }
    }

    /// Items of a `for...of` iterable: strings, arrays, and objects carrying
    /// an array under the iterator identifier. `None` when not iterable.
    fn iterate(&self, value: &Value) -> Option<Vec<Value>> {
        match value {
            Value::String(s) => Some(s.chars().map(|c| Value::String(c.to_string())).collect()),
            Value::Object(id) => {
                let object = self.heap.get(*id);
                if let Some(items) = object.as_array() {
                    return Some(items.to_vec());
                }
                match object.properties.get(&PropertyKey::Identifier(Identifier::ITERATOR)) {
                    Some(Value::Object(sequence)) => {
                        self.heap.get(*sequence).as_array().map(<[Value]>::to_vec)
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Implicit string conversion. Identifiers refuse it.
    fn to_string(&self, value: &Value) -> EvalResult<String> {
        self.to_string_guarded(value, &mut Vec::new())
    }

    fn to_string_guarded(&self, value: &Value, seen: &mut Vec<ObjectId>) -> EvalResult<String> {
        match value {
            Value::Undefined => Ok("undefined".to_owned()),
            Value::Null => Ok("null".to_owned()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(format_number(*n)),
            Value::String(s) => Ok(s.clone()),
            Value::Identifier(_) => Err(conversion_error("string")),
            Value::Builtin(builtin) => Ok(format!(
                "function {}() {{ [native code] }}",
                builtin.name()
            )),
            Value::Object(id) => match &self.heap.get(*id).kind {
                ObjectKind::Ordinary => Ok("[object Object]".to_owned()),
                ObjectKind::IdentifierWrapper(_) => Err(conversion_error("string")),
                ObjectKind::Array(items) => {
                    // Cycles join as empty.
                    if seen.contains(id) {
                        return Ok(String::new());
                    }
                    if seen.len() >= self.recursion_limit as usize {
                        return Err(RuntimeError::RecursionLimitExceeded);
                    }
                    seen.push(*id);
                    let mut parts = Vec::with_capacity(items.len());
                    for item in items {
                        parts.push(match item {
                            Value::Undefined | Value::Null => String::new(),
                            other => self.to_string_guarded(other, seen)?,
                        });
                    }
                    seen.pop();
                    Ok(parts.join(","))
                }
            },
        }
    }

    fn to_number(&self, value: &Value) -> EvalResult<f64> {
        match value {
            Value::Undefined => Ok(f64::NAN),
            Value::Null => Ok(0.0),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => Ok(*n),
            Value::String(s) => Ok(parse_number(s)),
            Value::Identifier(_) => Err(conversion_error("number")),
            Value::Builtin(_) => Ok(f64::NAN),
            Value::Object(_) => {
                let primitive = self.to_primitive(value)?;
                self.to_number(&primitive)
            }
        }
    }

    /// Objects to primitives: wrappers unbox, everything else stringifies.
    fn to_primitive(&self, value: &Value) -> EvalResult<Value> {
        match value {
            Value::Object(id) => match self.heap.get(*id).wrapped_identifier() {
                Some(wrapped) => Ok(Value::Identifier(wrapped)),
                None => Ok(Value::String(self.to_string(value)?)),
            },
            other => Ok(other.clone()),
        }
    }

    /// `+`: concatenation when either side is a string after unboxing,
    /// numeric addition otherwise.
    fn add(&self, lhs: &Value, rhs: &Value) -> EvalResult<Value> {
        let lhs = self.to_primitive(lhs)?;
        let rhs = self.to_primitive(rhs)?;
        if matches!(lhs, Value::String(_)) || matches!(rhs, Value::String(_)) {
            let mut out = self.to_string(&lhs)?;
            out.push_str(&self.to_string(&rhs)?);
            return Ok(Value::String(out));
        }
        Ok(Value::Number(self.to_number(&lhs)? + self.to_number(&rhs)?))
    }

    fn loose_equals(&self, lhs: &Value, rhs: &Value) -> bool {
        match (lhs, rhs) {
            (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
            (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
            (Value::Number(a), Value::String(b)) => *a == parse_number(b),
            (Value::String(a), Value::Number(b)) => parse_number(a) == *b,
            (Value::Bool(b), other) => {
                self.loose_equals(&Value::Number(if *b { 1.0 } else { 0.0 }), other)
            }
            (other, Value::Bool(b)) => {
                self.loose_equals(other, &Value::Number(if *b { 1.0 } else { 0.0 }))
            }
            (Value::Object(_), Value::Object(_)) => lhs == rhs,
            (Value::Object(_), _) => self
                .to_primitive(lhs)
                .is_ok_and(|primitive| self.loose_equals(&primitive, rhs)),
            (_, Value::Object(_)) => self
                .to_primitive(rhs)
                .is_ok_and(|primitive| self.loose_equals(lhs, &primitive)),
            _ => lhs == rhs,
        }
    }
}

/// Canonical array index: digits with no leading zero, at most
/// [`MAX_ARRAY_INDEX`].
fn array_index(key: &str) -> Option<usize> {
    let index: usize = key.parse().ok()?;
    (index.to_string() == key && index <= MAX_ARRAY_INDEX).then_some(index)
}

fn conversion_error(target: &str) -> RuntimeError {
    RuntimeError::type_mismatch(format!("Cannot convert an Identifier value to a {target}"))
}

fn not_an_object() -> RuntimeError {
    RuntimeError::type_mismatch("Cannot convert undefined or null to object")
}
