//! The term algebra: the single data type every other module in the CORE
//! operates on. Facts, rule heads/bodies, query goals, and answers are all
//! `Term` values — there is no separate "goal" or "clause body" type.

use std::fmt;

use crate::expr::{ArithExpr, Comparison};

/// A clause: `head :- body.` A fact is stored with `body == Term::True`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub head: Term,
    pub body: Term,
}

/// A Prolog term, generalized just enough to carry this interpreter's
/// control constructs (`Conjunction`, `Cut`, `True`/`False`) and its two
/// expression sub-languages (`Arithmetic`, `Logic`) alongside ordinary data.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A nullary functor, e.g. `foo`, `[]`, `nil`.
    Atom(String),
    /// A numeric literal. Prolog doesn't distinguish int/float at this scope;
    /// both live here as `f64`.
    Num(f64),
    /// A variable, identified by name. `"_"` is the anonymous wildcard: it is
    /// never bound and never appears in a displayed solution.
    Var(String),
    /// `functor(arg1, ..., argN)`, N >= 1. Arity-0 functors are `Atom`.
    Compound(String, Vec<Term>),
    /// A single list cons cell: head and tail. A proper list is a chain of
    /// `Dot`s ending in `Atom("[]")`.
    Dot(Box<Term>, Box<Term>),
    /// Sugar for `[H1, ..., Hn | Tail]`: `list` is a `Dot` chain that would
    /// normally terminate in `Atom("[]")`, but `tail` replaces that final
    /// `[]`. Kept as its own variant (rather than desugared at parse time)
    /// because it is a distinct entity in the term grammar; `subst::unify`
    /// and `Display` both flatten it through the same `Dot`-chain walk.
    Bar(Box<Term>, Box<Term>),
    /// `Var is Expr`: binds `var` to the evaluated arithmetic expression.
    Arithmetic(String, ArithExpr),
    /// A single arithmetic comparison goal (`==`, `=/`, `=<`, `<`, `>=`, `>`).
    Logic(Comparison),
    /// A sequence of goals joined by `,`. Always non-empty as produced by the
    /// parser; an empty conjunction (treated as trivially true) can still be
    /// constructed and is handled by the resolver like `True`.
    Conjunction(Vec<Term>),
    /// The marker produced for a fact's (empty) body and for a successfully
    /// exhausted conjunction.
    True,
    /// The marker a goal can reduce to represent unconditional logical
    /// failure. Source programs reach this through the `fail` builtin name
    /// rather than constructing it directly.
    False,
    /// `!`. Commits the enclosing clause activation to every choice made so
    /// far; see `resolver` for how the barrier is implemented.
    Cut,
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Term {
        Term::Atom(name.into())
    }

    pub fn var(name: impl Into<String>) -> Term {
        Term::Var(name.into())
    }

    pub fn compound(functor: impl Into<String>, args: Vec<Term>) -> Term {
        Term::Compound(functor.into(), args)
    }

    /// `[]`
    pub fn nil() -> Term {
        Term::Atom("[]".to_string())
    }

    /// Builds a proper list from `items`, terminated by `[]`.
    pub fn list(items: Vec<Term>) -> Term {
        items
            .into_iter()
            .rev()
            .fold(Term::nil(), |tail, head| Term::Dot(Box::new(head), Box::new(tail)))
    }

    pub fn is_wildcard_var(&self) -> bool {
        matches!(self, Term::Var(name) if name == "_")
    }

    /// Renames every non-wildcard variable occurring in this term by
    /// appending `#<suffix>` to its name. Called once per clause activation
    /// (standardizing the clause apart from every other activation of it,
    /// and from the caller) before the clause's head is unified against the
    /// calling goal.
    pub fn rename(&self, suffix: u64) -> Term {
        match self {
            Term::Atom(_) | Term::Num(_) | Term::True | Term::False | Term::Cut => self.clone(),
            Term::Var(name) => {
                if name == "_" {
                    self.clone()
                } else {
                    Term::Var(format!("{name}#{suffix}"))
                }
            }
            Term::Compound(f, args) => {
                Term::Compound(f.clone(), args.iter().map(|a| a.rename(suffix)).collect())
            }
            Term::Dot(h, t) => Term::Dot(Box::new(h.rename(suffix)), Box::new(t.rename(suffix))),
            Term::Bar(l, t) => Term::Bar(Box::new(l.rename(suffix)), Box::new(t.rename(suffix))),
            Term::Arithmetic(name, expr) => {
                let renamed_name = if name == "_" {
                    name.clone()
                } else {
                    format!("{name}#{suffix}")
                };
                Term::Arithmetic(renamed_name, expr.rename(suffix))
            }
            Term::Logic(cmp) => Term::Logic(cmp.rename(suffix)),
            Term::Conjunction(goals) => {
                Term::Conjunction(goals.iter().map(|g| g.rename(suffix)).collect())
            }
        }
    }

    /// Walks a list-shaped term (`Dot`/`Bar` chain), collecting the elements
    /// and returning the dangling tail, if any (`None` for a proper list
    /// ending in `[]`). Shared by `Display` and by list-aware callers.
    pub fn flatten_list(&self) -> (Vec<&Term>, Option<&Term>) {
        let mut items = Vec::new();
        let tail = flatten_into(self, &mut items);
        (items, tail)
    }
}

fn flatten_into<'a>(term: &'a Term, items: &mut Vec<&'a Term>) -> Option<&'a Term> {
    match term {
        Term::Dot(h, t) => {
            items.push(h.as_ref());
            flatten_into(t.as_ref(), items)
        }
        Term::Bar(list, tail) => match flatten_into(list.as_ref(), items) {
            None => flatten_into(tail.as_ref(), items),
            Some(dangling) => Some(dangling),
        },
        Term::Atom(a) if a == "[]" => None,
        other => Some(other),
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) => write!(f, "{name}"),
            Term::Num(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Term::Var(name) => write!(f, "{name}"),
            Term::Compound(functor, args) => {
                write!(f, "{functor}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
            Term::Dot(..) | Term::Bar(..) => {
                let (items, tail) = self.flatten_list();
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if let Some(t) = tail {
                    write!(f, "|{t}")?;
                }
                write!(f, "]")
            }
            Term::Arithmetic(name, expr) => write!(f, "{name} is {expr}"),
            Term::Logic(cmp) => write!(f, "{cmp}"),
            Term::Conjunction(goals) => {
                for (i, g) in goals.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{g}")?;
                }
                Ok(())
            }
            Term::True => write!(f, "true"),
            Term::False => write!(f, "false"),
            Term::Cut => write!(f, "!"),
        }
    }
}
