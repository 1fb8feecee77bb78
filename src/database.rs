//! The dynamic clause store (`spec.md` §4.4): an ordered list of rules plus
//! the side-effect output buffer `write`/`nl`/`tab` accumulate into.

use log::debug;

use crate::subst::unify;
use crate::term::{Rule, Term};

/// The live rule database. Mutated in place by `asserta`/`assertz`/`retract`
/// — a proof already in progress sees the change immediately, since clause
/// lookup (`resolver::ClauseCallSolutions`) always re-reads `rules` rather
/// than working from a snapshot taken at call time.
#[derive(Debug, Default)]
pub struct Database {
    pub rules: Vec<Rule>,
    /// Bookkeeping position reset by `reset_stream`; mirrors the field the
    /// original's `Database` carries for top-level query driving. Clause
    /// resolution itself doesn't use it — each call frame walks `rules`
    /// with its own local index instead, since nested calls must not share
    /// a single cursor.
    pub cursor: usize,
    /// Accumulated `write`/`nl`/`tab` output for the query currently being
    /// solved.
    pub out: String,
    fresh_counter: u64,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append<I: IntoIterator<Item = Rule>>(&mut self, rules: I) {
        self.rules.extend(rules);
    }

    pub fn reset_stream(&mut self) {
        self.cursor = 0;
        self.out.clear();
    }

    /// Prepends a fact built from `clause` (an already-instantiated head).
    pub fn assert_a(&mut self, clause: Term) {
        debug!("asserta {clause}");
        self.rules.insert(
            0,
            Rule {
                head: clause,
                body: Term::True,
            },
        );
    }

    /// Appends a fact built from `clause`.
    pub fn assert_z(&mut self, clause: Term) {
        debug!("assertz {clause}");
        self.rules.push(Rule {
            head: clause,
            body: Term::True,
        });
    }

    /// Removes the first clause (fact or rule) whose head unifies with
    /// `pattern`, returning the unifier. `None` if nothing matches — a
    /// logical failure, not an error (see `error` module docs).
    pub fn retract(&mut self, pattern: &Term) -> Option<crate::subst::Substitution> {
        for i in 0..self.rules.len() {
            let suffix = self.fresh_suffix();
            let renamed_head = self.rules[i].head.rename(suffix);
            if let Some(sigma) = unify(pattern, &renamed_head) {
                debug!("retract removed clause {}", self.rules[i].head);
                self.rules.remove(i);
                return Some(sigma);
            }
        }
        None
    }

    pub fn write(&mut self, s: &str) {
        self.out.push_str(s);
    }

    pub fn nl(&mut self) {
        self.out.push('\n');
    }

    pub fn tab(&mut self) {
        self.out.push('\t');
    }

    /// Drains and returns the output accumulated so far.
    pub fn stream_read(&mut self) -> String {
        std::mem::take(&mut self.out)
    }

    /// Returns a fresh activation suffix, unique for the lifetime of this
    /// database. Used to standardize a clause apart on each invocation.
    pub fn fresh_suffix(&mut self) -> u64 {
        self.fresh_counter += 1;
        self.fresh_counter
    }
}
