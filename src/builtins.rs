//! Control and side-effect built-ins (`spec.md` §4.5 points 6–11): `is`,
//! comparisons, `write`/`nl`/`tab`, and `asserta`/`assertz`/`retract`. Each
//! handler produces a `resolver::Solutions` stream of exactly zero or one
//! answer — these are all semidet by construction.

use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use crate::database::Database;
use crate::error::EngineError;
use crate::expr::{eval_arith, eval_comparison, ArithExpr, Comparison};
use crate::resolver::Solutions;
use crate::subst::Substitution;
use crate::term::Term;

pub fn once_ok(subst: Substitution) -> Solutions {
    Box::new(std::iter::once(Ok(subst)))
}

pub fn fail() -> Solutions {
    Box::new(std::iter::empty())
}

pub fn error_once(e: EngineError) -> Solutions {
    Box::new(std::iter::once(Err(e)))
}

/// `!`. Succeeds exactly once; on that single pull it also trips the shared
/// cut barrier for the enclosing clause activation.
pub struct CutOnce {
    subst: Option<Substitution>,
    barrier: Rc<Cell<bool>>,
}

impl CutOnce {
    pub fn new(subst: Substitution, barrier: Rc<Cell<bool>>) -> Self {
        Self {
            subst: Some(subst),
            barrier,
        }
    }
}

impl Iterator for CutOnce {
    type Item = Result<Substitution, EngineError>;
    fn next(&mut self) -> Option<Self::Item> {
        match self.subst.take() {
            Some(s) => {
                self.barrier.set(true);
                Some(Ok(s))
            }
            None => None,
        }
    }
}

pub fn cut_once(subst: Substitution, barrier: Rc<Cell<bool>>) -> Solutions {
    Box::new(CutOnce::new(subst, barrier))
}

/// `Var is Expr`. Binds `name` if unbound; succeeds without binding if
/// already bound to the matching number; fails (no error) if bound to
/// something else.
pub fn arithmetic_goal(name: String, expr: ArithExpr, subst: Substitution) -> Solutions {
    let value = match eval_arith(&expr, &subst) {
        Ok(v) => v,
        Err(e) => return error_once(e),
    };
    match subst.get(&name) {
        None => {
            let extra = Substitution::singleton(name, Term::Num(value));
            match subst.compose(&extra) {
                Some(combined) => once_ok(combined),
                None => fail(),
            }
        }
        Some(Term::Num(existing)) => {
            if *existing == value {
                once_ok(subst)
            } else {
                fail()
            }
        }
        Some(_) => fail(),
    }
}

/// A single comparison goal; succeeds with the unchanged substitution when
/// true, fails (no binding change, no error) when false.
pub fn logic_goal(cmp: Comparison, subst: Substitution) -> Solutions {
    match eval_comparison(&cmp, &subst) {
        Ok(true) => once_ok(subst),
        Ok(false) => fail(),
        Err(e) => error_once(e),
    }
}

pub fn write_goal(term: Term, subst: Substitution, db: Rc<RefCell<Database>>) -> Solutions {
    let rendered = term.substitute(&subst);
    db.borrow_mut().write(&rendered.to_string());
    once_ok(subst)
}

pub fn nl_goal(subst: Substitution, db: Rc<RefCell<Database>>) -> Solutions {
    db.borrow_mut().nl();
    once_ok(subst)
}

pub fn tab_goal(subst: Substitution, db: Rc<RefCell<Database>>) -> Solutions {
    db.borrow_mut().tab();
    once_ok(subst)
}

pub fn assert_goal(
    term: Term,
    subst: Substitution,
    db: Rc<RefCell<Database>>,
    prepend: bool,
) -> Solutions {
    let instantiated = term.substitute(&subst);
    let mut db = db.borrow_mut();
    if prepend {
        db.assert_a(instantiated);
    } else {
        db.assert_z(instantiated);
    }
    once_ok(subst)
}

pub fn retract_goal(term: Term, subst: Substitution, db: Rc<RefCell<Database>>) -> Solutions {
    let pattern = term.substitute(&subst);
    let unifier = db.borrow_mut().retract(&pattern);
    match unifier {
        Some(sigma) => match subst.compose(&sigma) {
            Some(combined) => once_ok(combined),
            None => fail(),
        },
        None => fail(),
    }
}
