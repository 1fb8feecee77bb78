//! Substitutions and unification (`spec.md` §4.1–4.2).

use std::collections::HashMap;
use std::fmt;

use log::trace;

use crate::term::Term;

/// A variable binding map. Grows monotonically as resolution proceeds: once
/// a variable is bound within one proof attempt it is never rebound to
/// something different (a second, conflicting binding is a unification
/// failure, not an overwrite).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Substitution(HashMap<String, Term>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(HashMap::new())
    }

    /// A substitution binding a single variable, used by built-ins that
    /// introduce exactly one new binding (`is`, `retract`'s unifier merge).
    pub fn singleton(name: String, term: Term) -> Self {
        let mut map = HashMap::with_capacity(1);
        map.insert(name, term);
        Substitution(map)
    }

    pub fn get(&self, name: &str) -> Option<&Term> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Term)> {
        self.0.iter()
    }

    /// Extends this substitution with a single new binding. Panics if
    /// `name` is already bound to something else — callers that can't prove
    /// this should go through `compose` instead.
    fn bind(&self, name: String, term: Term) -> Substitution {
        let mut map = self.0.clone();
        map.insert(name, term);
        Substitution(map)
    }

    /// Composes `self` with `other`: every existing binding has `other`
    /// applied to its value, then `other`'s own bindings are added. A key
    /// present in both with differing images is a contradiction (`⊥`).
    pub fn compose(&self, other: &Substitution) -> Option<Substitution> {
        let mut result: HashMap<String, Term> = HashMap::with_capacity(self.0.len() + other.0.len());
        for (k, v) in self.0.iter() {
            result.insert(k.clone(), v.substitute(other));
        }
        for (k, v) in other.0.iter() {
            match result.get(k) {
                Some(existing) if existing != v => return None,
                Some(_) => {}
                None => {
                    result.insert(k.clone(), v.clone());
                }
            }
        }
        Some(Substitution(result))
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (i, (k, v)) in entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k} = {v}")?;
        }
        Ok(())
    }
}

impl Term {
    /// Applies a substitution recursively, chasing variable-to-variable
    /// chains to their final image. `Arithmetic`/`Logic` subexpressions are
    /// left untouched: their variables are resolved lazily against the live
    /// substitution at evaluation time (see `expr::eval_arith`).
    pub fn substitute(&self, subst: &Substitution) -> Term {
        match self {
            Term::Var(name) => {
                if name == "_" {
                    self.clone()
                } else {
                    match subst.get(name) {
                        Some(bound) => bound.clone().substitute(subst),
                        None => self.clone(),
                    }
                }
            }
            Term::Atom(_)
            | Term::Num(_)
            | Term::True
            | Term::False
            | Term::Cut
            | Term::Arithmetic(..)
            | Term::Logic(..) => self.clone(),
            Term::Compound(f, args) => {
                Term::Compound(f.clone(), args.iter().map(|a| a.substitute(subst)).collect())
            }
            Term::Dot(h, t) => Term::Dot(
                Box::new(h.substitute(subst)),
                Box::new(t.substitute(subst)),
            ),
            Term::Bar(l, t) => Term::Bar(
                Box::new(l.substitute(subst)),
                Box::new(t.substitute(subst)),
            ),
            Term::Conjunction(goals) => {
                Term::Conjunction(goals.iter().map(|g| g.substitute(subst)).collect())
            }
        }
    }

    /// Structural unification, returning the most general unifier or `None`
    /// if the two terms cannot be made equal.
    pub fn unify_with(&self, other: &Term) -> Option<Substitution> {
        unify(self, other)
    }
}

/// The wildcard `_` unifies with anything and binds nothing.
fn bind_var(name: &str, value: &Term) -> Option<Substitution> {
    if name == "_" {
        return Some(Substitution::empty());
    }
    if let Term::Var(other) = value {
        if other == name {
            return Some(Substitution::empty());
        }
    }
    Some(Substitution::empty().bind(name.to_string(), value.clone()))
}

/// Computes the most general unifier of `a` and `b`. Desugars `Bar` into its
/// equivalent `Dot`-chain-with-replaced-tail form before matching, so a
/// literal list and its `[H|T]`-sugared equivalent unify identically.
pub fn unify(a: &Term, b: &Term) -> Option<Substitution> {
    trace!("unify {a} with {b}");
    let a = desugar_bar(a);
    let b = desugar_bar(b);
    match (&a, &b) {
        (Term::Var(x), Term::Var(y)) if x == y => Some(Substitution::empty()),
        (Term::Var(x), _) => bind_var(x, &b),
        (_, Term::Var(y)) => bind_var(y, &a),
        (Term::Atom(x), Term::Atom(y)) => (x == y).then(Substitution::empty),
        (Term::Num(x), Term::Num(y)) => (x == y).then(Substitution::empty),
        (Term::True, Term::True) | (Term::False, Term::False) | (Term::Cut, Term::Cut) => {
            Some(Substitution::empty())
        }
        (Term::Compound(f1, args1), Term::Compound(f2, args2)) => {
            if f1 != f2 || args1.len() != args2.len() {
                return None;
            }
            let mut sigma = Substitution::empty();
            for (x, y) in args1.iter().zip(args2.iter()) {
                let x = x.substitute(&sigma);
                let y = y.substitute(&sigma);
                let step = unify(&x, &y)?;
                sigma = sigma.compose(&step)?;
            }
            Some(sigma)
        }
        (Term::Dot(h1, t1), Term::Dot(h2, t2)) => {
            let sh = unify(h1, h2)?;
            let t1 = t1.substitute(&sh);
            let t2 = t2.substitute(&sh);
            let st = unify(&t1, &t2)?;
            sh.compose(&st)
        }
        _ => None,
    }
}

/// Rewrites a `Bar` into the `Dot`-chain it desugars to; leaves any other
/// term unchanged. Only peels a single top-level `Bar`, recursing as needed
/// since `unify`/`flatten_list` apply this at every level they examine.
fn desugar_bar(term: &Term) -> Term {
    match term {
        Term::Bar(list, tail) => splice_tail(list, tail),
        other => other.clone(),
    }
}

fn splice_tail(list: &Term, tail: &Term) -> Term {
    match list {
        Term::Dot(h, t) => match t.as_ref() {
            Term::Atom(a) if a == "[]" => Term::Dot(h.clone(), Box::new(desugar_bar(tail))),
            _ => Term::Dot(h.clone(), Box::new(splice_tail(t, tail))),
        },
        Term::Atom(a) if a == "[]" => desugar_bar(tail),
        other => other.clone(),
    }
}
