//! A small Prolog interpreter: term algebra, unification, a dynamic clause
//! database, and a depth-first SLD resolution engine with cut and the
//! control/side-effect built-ins (`fail`, `write`, `nl`, `tab`, `is`,
//! comparisons, `asserta`/`assertz`/`retract`).
//!
//! `term`, `expr`, `subst`, `database`, `builtins`, and `resolver` are the
//! CORE: self-contained, with no dependency on how a program's concrete
//! syntax is parsed. `syntax` is the concrete-syntax front end used by the
//! `tarski` binary; nothing in the CORE depends on it.

pub mod builtins;
pub mod database;
pub mod error;
pub mod expr;
pub mod resolver;
pub mod subst;
pub mod syntax;
pub mod term;

pub use database::Database;
pub use error::EngineError;
pub use resolver::{execute, project_bindings, solve, Solutions};
pub use subst::{unify, Substitution};
pub use term::{Rule, Term};
