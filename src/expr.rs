//! Arithmetic and comparison expression trees, and their evaluators.
//!
//! Mirrors the original interpreter's two visitors (`MathInterpreter` and
//! `LogicInterpreter`), which walk the same `visit_binary`/`visit_primary`
//! shape over two disjoint operator sets. Here that shape is `eval_arith`
//! (arithmetic leaves/operators only) and `eval_comparison` (one comparison
//! of two arithmetic subexpressions — Prolog doesn't chain comparisons).

use std::fmt;

use crate::error::EngineError;
use crate::subst::Substitution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Le,
    Lt,
    Ge,
    Gt,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "=/",
            CompareOp::Le => "=<",
            CompareOp::Lt => "<",
            CompareOp::Ge => ">=",
            CompareOp::Gt => ">",
        };
        write!(f, "{s}")
    }
}

/// An arithmetic expression tree. Leaves are numeric literals or variables;
/// variables are resolved against the live `Substitution` at evaluation
/// time (not eagerly substituted), since an interpreter `Term::substitute`
/// pass never needs to look inside one of these — see `resolver::solve`.
#[derive(Debug, Clone, PartialEq)]
pub enum ArithExpr {
    Num(f64),
    Var(String),
    Binary(ArithOp, Box<ArithExpr>, Box<ArithExpr>),
}

impl ArithExpr {
    pub fn rename(&self, suffix: u64) -> ArithExpr {
        match self {
            ArithExpr::Num(n) => ArithExpr::Num(*n),
            ArithExpr::Var(name) => {
                if name == "_" {
                    self.clone()
                } else {
                    ArithExpr::Var(format!("{name}#{suffix}"))
                }
            }
            ArithExpr::Binary(op, l, r) => {
                ArithExpr::Binary(*op, Box::new(l.rename(suffix)), Box::new(r.rename(suffix)))
            }
        }
    }
}

impl fmt::Display for ArithExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithExpr::Num(n) => write!(f, "{n}"),
            ArithExpr::Var(name) => write!(f, "{name}"),
            ArithExpr::Binary(op, l, r) => write!(f, "{l} {op} {r}"),
        }
    }
}

/// A single comparison of two arithmetic subexpressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub op: CompareOp,
    pub left: ArithExpr,
    pub right: ArithExpr,
}

impl Comparison {
    pub fn rename(&self, suffix: u64) -> Comparison {
        Comparison {
            op: self.op,
            left: self.left.rename(suffix),
            right: self.right.rename(suffix),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

fn visit_primary(n: f64) -> f64 {
    n
}

fn visit_binary(op: ArithOp, l: f64, r: f64) -> f64 {
    match op {
        ArithOp::Add => l + r,
        ArithOp::Sub => l - r,
        ArithOp::Mul => l * r,
        ArithOp::Div => l / r,
    }
}

/// Evaluates an arithmetic expression against the current bindings. A
/// variable that is unbound, or bound to a non-number, is a type error
/// (`spec.md` §7: mismatched leaf types, not logical failure).
pub fn eval_arith(expr: &ArithExpr, subst: &Substitution) -> Result<f64, EngineError> {
    match expr {
        ArithExpr::Num(n) => Ok(visit_primary(*n)),
        ArithExpr::Var(name) => match subst.get(name) {
            Some(crate::term::Term::Num(n)) => Ok(visit_primary(*n)),
            Some(other) => Err(EngineError::NotANumber(other.to_string())),
            None => Err(EngineError::UnboundArithmeticVariable(name.clone())),
        },
        ArithExpr::Binary(op, l, r) => {
            let lv = eval_arith(l, subst)?;
            let rv = eval_arith(r, subst)?;
            Ok(visit_binary(*op, lv, rv))
        }
    }
}

/// Evaluates a comparison goal, producing its truth value.
pub fn eval_comparison(cmp: &Comparison, subst: &Substitution) -> Result<bool, EngineError> {
    let l = eval_arith(&cmp.left, subst)?;
    let r = eval_arith(&cmp.right, subst)?;
    Ok(match cmp.op {
        CompareOp::Eq => l == r,
        CompareOp::Ne => l != r,
        CompareOp::Le => l <= r,
        CompareOp::Lt => l < r,
        CompareOp::Ge => l >= r,
        CompareOp::Gt => l > r,
    })
}
