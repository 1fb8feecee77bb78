//! Errors the engine can raise. Mirrors the shape of the teacher's
//! `machine::error_handling::MachineError`: a flat `thiserror`-derived enum,
//! one variant per real failure kind.
//!
//! Logical failure — a goal with no solutions, `fail`, a `retract` that
//! matches nothing — is represented by the resolver yielding no solutions.
//! It is never one of these variants (`spec.md` §7).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("type error: expected a number, found `{0}`")]
    NotANumber(String),

    #[error("arithmetic expression references unbound variable `{0}`")]
    UnboundArithmeticVariable(String),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("file not found: {0}")]
    FileNotFound(String),
}
