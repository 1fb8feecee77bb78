//! Concrete syntax: scanner + recursive-descent parser. Produces the CORE's
//! `Term`/`Rule` values; the CORE has no dependency back on this module
//! (`spec.md` §1 frames the parser as an external collaborator).

pub mod parser;
pub mod scanner;
pub mod token;

use crate::error::EngineError;
use crate::term::{Rule, Term};
use parser::Parser;
use scanner::Scanner;

/// Parses a whole program (a sequence of `head.` / `head :- body.` clauses).
pub fn parse_program(src: &str) -> Result<Vec<Rule>, EngineError> {
    let tokens = Scanner::new(src).tokenize()?;
    Parser::new(tokens).parse_program()
}

/// Parses a single query (a goal, or comma-joined sequence of goals).
pub fn parse_query(src: &str) -> Result<Term, EngineError> {
    let tokens = Scanner::new(src).tokenize()?;
    Parser::new(tokens).parse_query()
}
