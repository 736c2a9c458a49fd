//! Indented text rendering of the syntax tree, for `sigil ast` and tests.

use super::ast::{Expr, ExprKind, Program, PropName, Stmt, StmtKind, UnaryOp};

pub fn dump_program(program: &Program) -> String {
    let mut out = String::new();
    out.push_str("Program");
    for stmt in &program.stmts {
        dump_stmt(&mut out, stmt, 1);
    }
    out
}

fn line(out: &mut String, depth: usize, text: impl AsRef<str>) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(text.as_ref());
}

fn dump_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    match &stmt.kind {
        StmtKind::Declare { kind, name, init } => {
            line(out, depth, format!("Declare {} {name}", kind.as_str()));
            dump_expr(out, init, depth + 1);
        }
        StmtKind::Assign { target, value } => {
            line(out, depth, "Assign");
            dump_expr(out, target, depth + 1);
            dump_expr(out, value, depth + 1);
        }
        StmtKind::Expr(expr) => {
            line(out, depth, "Watch");
            dump_expr(out, expr, depth + 1);
        }
        StmtKind::If {
            cond,
            then,
            otherwise,
        } => {
            line(out, depth, "If");
            dump_expr(out, cond, depth + 1);
            dump_stmt(out, then, depth + 1);
            if let Some(otherwise) = otherwise {
                line(out, depth, "Else");
                dump_stmt(out, otherwise, depth + 1);
            }
        }
        StmtKind::ForOf {
            kind,
            name,
            iterable,
            body,
        } => {
            line(out, depth, format!("ForOf {} {name}", kind.as_str()));
            dump_expr(out, iterable, depth + 1);
            dump_stmt(out, body, depth + 1);
        }
        StmtKind::Block(stmts) => {
            line(out, depth, "Block");
            for stmt in stmts {
                dump_stmt(out, stmt, depth + 1);
            }
        }
        StmtKind::Empty => line(out, depth, "Empty"),
    }
}

fn dump_expr(out: &mut String, expr: &Expr, depth: usize) {
    match &expr.kind {
        ExprKind::Undefined => line(out, depth, "Undefined"),
        ExprKind::Null => line(out, depth, "Null"),
        ExprKind::Bool(b) => line(out, depth, format!("Bool {b}")),
        ExprKind::Number(n) => line(out, depth, format!("Number {n}")),
        ExprKind::Str(s) => line(out, depth, format!("Str {s:?}")),
        ExprKind::Name(name) => line(out, depth, format!("Name {name}")),
        ExprKind::Array(elements) => {
            line(out, depth, "Array");
            for element in elements {
                dump_expr(out, element, depth + 1);
            }
        }
        ExprKind::Object(props) => {
            line(out, depth, "Object");
            for (name, value) in props {
                match name {
                    PropName::Named(name) => line(out, depth + 1, format!("Prop {name:?}")),
                    PropName::Computed(key) => {
                        line(out, depth + 1, "Prop");
                        dump_expr(out, key, depth + 2);
                    }
                }
                dump_expr(out, value, depth + 2);
            }
        }
        ExprKind::Member { object, property } => {
            line(out, depth, format!("Member .{property}"));
            dump_expr(out, object, depth + 1);
        }
        ExprKind::Index { object, index } => {
            line(out, depth, "Index");
            dump_expr(out, object, depth + 1);
            dump_expr(out, index, depth + 1);
        }
        ExprKind::Call { callee, args } => {
            line(out, depth, "Call");
            dump_expr(out, callee, depth + 1);
            for arg in args {
                dump_expr(out, arg, depth + 1);
            }
        }
        ExprKind::New { callee, args } => {
            line(out, depth, "New");
            dump_expr(out, callee, depth + 1);
            for arg in args {
                dump_expr(out, arg, depth + 1);
            }
        }
        ExprKind::Unary { op, operand } => {
            let op = match op {
                UnaryOp::Typeof => "typeof",
                UnaryOp::Not => "!",
            };
            line(out, depth, format!("Unary {op}"));
            dump_expr(out, operand, depth + 1);
        }
        ExprKind::Binary { op, lhs, rhs } => {
            line(out, depth, format!("Binary {}", op.as_str()));
            dump_expr(out, lhs, depth + 1);
            dump_expr(out, rhs, depth + 1);
        }
    }
}
