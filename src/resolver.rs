//! SLD resolution (`spec.md` §4.5): depth-first proof search over the term
//! algebra, producing a lazy stream of substitutions.
//!
//! There is no native Rust generator to build this on, so the lazy answer
//! stream is the explicit object `spec.md` §9 calls for: `Solutions` is a
//! boxed `Iterator`, and the two goal shapes that can backtrack
//! (`Conjunction`, a predicate call) are their own iterator types holding an
//! explicit stack of suspended sub-iterators — the choice-point stack,
//! written out instead of left implicit in a call stack the consumer can't
//! pause.
//!
//! The database is shared via `Rc<RefCell<Database>>` rather than `&mut
//! Database`: built-ins (`assert`/`retract`/`write`) mutate it mid-proof,
//! and the mutation must be visible immediately to whichever goal is
//! solved next, even though several `Solutions` iterators may be suspended
//! (holding a logical claim on "the database") at once. A borrowed `&mut`
//! can't be captured by more than one of those at a time; `Rc<RefCell<_>>`
//! is the standard Rust answer for "one owner, many suspended resumption
//! points" sharing it.

use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace};

use crate::builtins::{
    arithmetic_goal, assert_goal, cut_once, error_once, fail, logic_goal, nl_goal, once_ok,
    retract_goal, tab_goal, write_goal,
};
use crate::database::Database;
use crate::error::EngineError;
use crate::subst::{unify, Substitution};
use crate::term::Term;

pub type Solutions = Box<dyn Iterator<Item = Result<Substitution, EngineError>>>;

/// Entry point: solves `goal` against `db`'s current ruleset. Resets the
/// output buffer first, matching the original driver's "each query starts
/// with a clean stream" behavior (`original_source/main.py`).
pub fn execute(db: &Rc<RefCell<Database>>, goal: Term) -> Solutions {
    db.borrow_mut().reset_stream();
    let barrier = Rc::new(Cell::new(false));
    solve(&goal, &Substitution::empty(), db.clone(), barrier)
}

/// Resolves a single goal under `subst`, sharing `cut` as the barrier for
/// whatever clause activation (or top-level query) `goal` belongs to.
pub fn solve(
    goal: &Term,
    subst: &Substitution,
    db: Rc<RefCell<Database>>,
    cut: Rc<Cell<bool>>,
) -> Solutions {
    let g = goal.substitute(subst);
    trace!("solve {g}");
    match g {
        Term::True => once_ok(subst.clone()),
        Term::False => fail(),
        Term::Cut => cut_once(subst.clone(), cut),
        Term::Conjunction(goals) => {
            if goals.is_empty() {
                once_ok(subst.clone())
            } else {
                Box::new(ConjunctionSolutions::new(goals, subst.clone(), db, cut))
            }
        }
        Term::Arithmetic(name, expr) => arithmetic_goal(name, expr, subst.clone()),
        Term::Logic(cmp) => logic_goal(cmp, subst.clone()),
        Term::Atom(ref name) if name == "fail" => fail(),
        Term::Atom(ref name) if name == "nl" => nl_goal(subst.clone(), db),
        Term::Atom(ref name) if name == "tab" => tab_goal(subst.clone(), db),
        Term::Compound(ref name, ref args) if name == "write" && args.len() == 1 => {
            write_goal(args[0].clone(), subst.clone(), db)
        }
        Term::Compound(ref name, ref args) if name == "asserta" && args.len() == 1 => {
            assert_goal(args[0].clone(), subst.clone(), db, true)
        }
        Term::Compound(ref name, ref args) if name == "assertz" && args.len() == 1 => {
            assert_goal(args[0].clone(), subst.clone(), db, false)
        }
        Term::Compound(ref name, ref args) if name == "retract" && args.len() == 1 => {
            retract_goal(args[0].clone(), subst.clone(), db)
        }
        Term::Atom(_) | Term::Compound(_, _) => Box::new(ClauseCallSolutions::new(g, db)),
        Term::Num(_) | Term::Var(_) | Term::Dot(..) | Term::Bar(..) => {
            error_once(EngineError::NotANumber(g.to_string()))
        }
    }
}

/// Resolves `goals` left to right, backtracking depth-first into earlier
/// goals when a later one is exhausted. `fired_at` records the position of
/// the first cut (if any) that has actually succeeded so far: once set,
/// exhaustion at or before that position ends the whole conjunction rather
/// than backtracking further — goals strictly after it keep backtracking
/// normally among themselves.
struct ConjunctionSolutions {
    goals: Vec<Term>,
    db: Rc<RefCell<Database>>,
    cut: Rc<Cell<bool>>,
    stack: Vec<Solutions>,
    fired_at: Option<usize>,
    init_subst: Substitution,
    done: bool,
}

impl ConjunctionSolutions {
    fn new(goals: Vec<Term>, init_subst: Substitution, db: Rc<RefCell<Database>>, cut: Rc<Cell<bool>>) -> Self {
        Self {
            goals,
            db,
            cut,
            stack: Vec::new(),
            fired_at: None,
            init_subst,
            done: false,
        }
    }
}

impl Iterator for ConjunctionSolutions {
    type Item = Result<Substitution, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if self.stack.is_empty() {
                let it = solve(&self.goals[0], &self.init_subst, self.db.clone(), self.cut.clone());
                self.stack.push(it);
            }
            let idx = self.stack.len() - 1;
            match self.stack[idx].next() {
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(sigma)) => {
                    if self.cut.get() && self.fired_at.is_none() {
                        self.fired_at = Some(idx);
                    }
                    if idx + 1 == self.goals.len() {
                        return Some(Ok(sigma));
                    }
                    let next_it = solve(&self.goals[idx + 1], &sigma, self.db.clone(), self.cut.clone());
                    self.stack.push(next_it);
                }
                None => {
                    if let Some(ci) = self.fired_at {
                        if idx <= ci {
                            self.done = true;
                            return None;
                        }
                    }
                    self.stack.pop();
                    if self.stack.is_empty() {
                        self.done = true;
                        return None;
                    }
                }
            }
        }
    }
}

/// Resolves a predicate call by walking the live clause list in order,
/// standardizing each candidate clause apart with a fresh activation suffix
/// before attempting to unify it against the call. The clause list is
/// re-read from `db` on every step (never snapshotted), so an `assertz`
/// performed by an earlier goal in the same proof is visible here.
struct ClauseCallSolutions {
    goal: Term,
    db: Rc<RefCell<Database>>,
    next_index: usize,
    current: Option<(Solutions, Substitution, Rc<Cell<bool>>)>,
    stopped: bool,
}

impl ClauseCallSolutions {
    fn new(goal: Term, db: Rc<RefCell<Database>>) -> Self {
        Self {
            goal,
            db,
            next_index: 0,
            current: None,
            stopped: false,
        }
    }
}

impl Iterator for ClauseCallSolutions {
    type Item = Result<Substitution, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.stopped {
                return None;
            }
            if let Some((body_iter, head_sigma, clause_cut)) = &mut self.current {
                match body_iter.next() {
                    // `head_sigma` and the body's own result were built by
                    // threading one through the other (see `solve`), so they
                    // can never actually disagree on a shared variable; if
                    // they somehow did, that candidate simply isn't a
                    // solution — move on to the next one from this clause.
                    Some(Ok(body_sigma)) => match head_sigma.compose(&body_sigma) {
                        Some(combined) => return Some(Ok(combined)),
                        None => continue,
                    },
                    Some(Err(e)) => return Some(Err(e)),
                    None => {
                        if clause_cut.get() {
                            self.stopped = true;
                            return None;
                        }
                        self.current = None;
                        continue;
                    }
                }
            }

            let rule = {
                let db = self.db.borrow();
                db.rules.get(self.next_index).cloned()
            };
            let rule = match rule {
                Some(r) => r,
                None => return None,
            };
            self.next_index += 1;

            let suffix = self.db.borrow_mut().fresh_suffix();
            let renamed_head = rule.head.rename(suffix);
            let renamed_body = rule.body.rename(suffix);
            debug!("try clause {renamed_head} :- {renamed_body}");
            if let Some(head_sigma) = unify(&self.goal, &renamed_head) {
                let clause_cut = Rc::new(Cell::new(false));
                let body_iter = solve(&renamed_body, &head_sigma, self.db.clone(), clause_cut.clone());
                self.current = Some((body_iter, head_sigma, clause_cut));
            }
        }
    }
}

/// Collects `goal`'s free variables (first-occurrence order, excluding the
/// wildcard) and looks up their final bindings in `subst`, producing the
/// uniform `Name = value` projection the REPL and tests display — the
/// single realization of both `spec.md` §4.6's query-projection step and
/// the display-contract Open Question (`DESIGN.md`).
pub fn project_bindings(goal: &Term, subst: &Substitution) -> Vec<(String, Term)> {
    let mut names = Vec::new();
    collect_vars(goal, &mut names);
    names
        .into_iter()
        .map(|name| {
            let value = Term::Var(name.clone()).substitute(subst);
            (name, value)
        })
        .collect()
}

fn collect_vars(term: &Term, out: &mut Vec<String>) {
    match term {
        Term::Var(name) => {
            if name != "_" && !out.contains(name) {
                out.push(name.clone());
            }
        }
        Term::Compound(_, args) => args.iter().for_each(|a| collect_vars(a, out)),
        Term::Dot(h, t) => {
            collect_vars(h, out);
            collect_vars(t, out);
        }
        Term::Bar(l, t) => {
            collect_vars(l, out);
            collect_vars(t, out);
        }
        Term::Conjunction(goals) => goals.iter().for_each(|g| collect_vars(g, out)),
        Term::Arithmetic(name, expr) => {
            if name != "_" && !out.contains(name) {
                out.push(name.clone());
            }
            collect_arith_vars(expr, out);
        }
        Term::Logic(cmp) => {
            collect_arith_vars(&cmp.left, out);
            collect_arith_vars(&cmp.right, out);
        }
        Term::Atom(_) | Term::Num(_) | Term::True | Term::False | Term::Cut => {}
    }
}

fn collect_arith_vars(expr: &crate::expr::ArithExpr, out: &mut Vec<String>) {
    match expr {
        crate::expr::ArithExpr::Var(name) => {
            if name != "_" && !out.contains(name) {
                out.push(name.clone());
            }
        }
        crate::expr::ArithExpr::Num(_) => {}
        crate::expr::ArithExpr::Binary(_, l, r) => {
            collect_arith_vars(l, out);
            collect_arith_vars(r, out);
        }
    }
}
