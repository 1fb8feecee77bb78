//! Recursive-descent parser, grounded on
//! `original_source/prolog/parser.py`. Produces this crate's `Term`/`Rule`
//! values directly; the CORE never depends back on this module.

use crate::error::EngineError;
use crate::expr::{ArithExpr, ArithOp, CompareOp, Comparison};
use crate::syntax::token::{Token, TokenKind};
use crate::term::{Rule, Term};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn kind(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn line(&self) -> usize {
        self.tokens[self.pos].line
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.tokens[self.pos].kind.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        kind
    }

    fn at_eof(&self) -> bool {
        matches!(self.kind(), TokenKind::Eof)
    }

    fn expect(&mut self, expected: TokenKind) -> Result<(), EngineError> {
        if *self.kind() == expected {
            self.advance();
            Ok(())
        } else {
            Err(EngineError::Syntax(format!(
                "expected {expected:?}, found {:?} on line {}",
                self.kind(),
                self.line()
            )))
        }
    }

    fn peek_is_atom(&self, text: &str) -> bool {
        matches!(self.kind(), TokenKind::Atom(name) if name == text)
    }

    fn try_consume_compare_op(&mut self) -> Option<CompareOp> {
        let op = match self.kind() {
            TokenKind::EqualEqual => CompareOp::Eq,
            TokenKind::EqualSlash => CompareOp::Ne,
            TokenKind::LessEqual => CompareOp::Le,
            TokenKind::Less => CompareOp::Lt,
            TokenKind::GreaterEqual => CompareOp::Ge,
            TokenKind::Greater => CompareOp::Gt,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    pub fn parse_program(&mut self) -> Result<Vec<Rule>, EngineError> {
        let mut rules = Vec::new();
        while !self.at_eof() {
            rules.push(self.parse_clause()?);
        }
        Ok(rules)
    }

    /// Parses a single query line (no trailing `.` required, to play nicely
    /// with a REPL prompt that supplies it implicitly).
    pub fn parse_query(&mut self) -> Result<Term, EngineError> {
        let goals = self.parse_goal_sequence()?;
        if *self.kind() == TokenKind::Dot {
            self.advance();
        }
        Ok(goals_to_term(goals))
    }

    fn parse_clause(&mut self) -> Result<Rule, EngineError> {
        let head = self.parse_atom_or_compound()?;
        if *self.kind() == TokenKind::Dot {
            self.advance();
            return Ok(Rule {
                head,
                body: Term::True,
            });
        }
        self.expect(TokenKind::ColonMinus)?;
        let goals = self.parse_goal_sequence()?;
        self.expect(TokenKind::Dot)?;
        Ok(Rule {
            head,
            body: goals_to_term(goals),
        })
    }

    fn parse_goal_sequence(&mut self) -> Result<Vec<Term>, EngineError> {
        let mut goals = vec![self.parse_goal()?];
        while *self.kind() == TokenKind::Comma {
            self.advance();
            goals.push(self.parse_goal()?);
        }
        Ok(goals)
    }

    fn parse_goal(&mut self) -> Result<Term, EngineError> {
        match self.kind().clone() {
            TokenKind::Cut => {
                self.advance();
                Ok(Term::Cut)
            }
            TokenKind::LeftBracket => self.parse_list(),
            TokenKind::LeftParen => self.parse_grouped_conjunction(),
            TokenKind::Variable(_) => self.parse_variable_goal(),
            TokenKind::Number(_) => self.parse_arith_leading_goal(),
            TokenKind::Atom(_) => self.parse_atom_or_compound(),
            other => Err(EngineError::Syntax(format!(
                "unexpected token {other:?} on line {}",
                self.line()
            ))),
        }
    }

    fn parse_variable_goal(&mut self) -> Result<Term, EngineError> {
        let name = match self.advance() {
            TokenKind::Variable(name) => name,
            _ => unreachable!(),
        };
        if self.peek_is_atom("is") {
            self.advance();
            let expr = self.parse_arith_expr()?;
            return Ok(Term::Arithmetic(name, expr));
        }
        let left = self.parse_arith_continuation(ArithExpr::Var(name.clone()))?;
        if let Some(op) = self.try_consume_compare_op() {
            let right = self.parse_arith_expr()?;
            return Ok(Term::Logic(Comparison { op, left, right }));
        }
        match left {
            ArithExpr::Var(n) => Ok(Term::Var(n)),
            _ => Err(EngineError::Syntax(format!(
                "arithmetic expression used as a goal on line {}",
                self.line()
            ))),
        }
    }

    fn parse_arith_leading_goal(&mut self) -> Result<Term, EngineError> {
        let n = match self.advance() {
            TokenKind::Number(n) => n,
            _ => unreachable!(),
        };
        let left = self.parse_arith_continuation(ArithExpr::Num(n))?;
        if let Some(op) = self.try_consume_compare_op() {
            let right = self.parse_arith_expr()?;
            return Ok(Term::Logic(Comparison { op, left, right }));
        }
        Err(EngineError::Syntax(format!(
            "a bare number is not a goal on line {}",
            self.line()
        )))
    }

    fn parse_atom_or_compound(&mut self) -> Result<Term, EngineError> {
        let name = match self.advance() {
            TokenKind::Atom(name) => name,
            other => {
                return Err(EngineError::Syntax(format!(
                    "expected an atom, found {other:?} on line {}",
                    self.line()
                )))
            }
        };
        if *self.kind() == TokenKind::LeftParen {
            self.advance();
            let mut args = vec![self.parse_data_term()?];
            while *self.kind() == TokenKind::Comma {
                self.advance();
                args.push(self.parse_data_term()?);
            }
            self.expect(TokenKind::RightParen)?;
            Ok(Term::Compound(name, args))
        } else {
            Ok(Term::Atom(name))
        }
    }

    fn parse_grouped_conjunction(&mut self) -> Result<Term, EngineError> {
        self.expect(TokenKind::LeftParen)?;
        let goals = self.parse_goal_sequence()?;
        self.expect(TokenKind::RightParen)?;
        Ok(goals_to_term(goals))
    }

    fn parse_list(&mut self) -> Result<Term, EngineError> {
        self.expect(TokenKind::LeftBracket)?;
        if *self.kind() == TokenKind::RightBracket {
            self.advance();
            return Ok(Term::nil());
        }
        let mut items = vec![self.parse_data_term()?];
        while *self.kind() == TokenKind::Comma {
            self.advance();
            items.push(self.parse_data_term()?);
        }
        let tail = if *self.kind() == TokenKind::Bar {
            self.advance();
            Some(self.parse_data_term()?)
        } else {
            None
        };
        self.expect(TokenKind::RightBracket)?;
        match tail {
            None => Ok(Term::list(items)),
            Some(t) => Ok(Term::Bar(Box::new(Term::list(items)), Box::new(t))),
        }
    }

    /// Parses a term in argument/list-element position: plain data, no
    /// `is`/comparison forms (those are goal-level constructs).
    fn parse_data_term(&mut self) -> Result<Term, EngineError> {
        match self.kind().clone() {
            TokenKind::Variable(name) => {
                self.advance();
                Ok(Term::Var(name))
            }
            TokenKind::Number(n) => {
                self.advance();
                Ok(Term::Num(n))
            }
            TokenKind::LeftBracket => self.parse_list(),
            TokenKind::Atom(_) => self.parse_atom_or_compound(),
            TokenKind::LeftParen => {
                self.advance();
                let t = self.parse_data_term()?;
                self.expect(TokenKind::RightParen)?;
                Ok(t)
            }
            other => Err(EngineError::Syntax(format!(
                "expected a term, found {other:?} on line {}",
                self.line()
            ))),
        }
    }

    fn parse_arith_expr(&mut self) -> Result<ArithExpr, EngineError> {
        let first = self.parse_arith_factor()?;
        self.parse_arith_continuation(first)
    }

    /// Continues an additive/multiplicative chain starting from an
    /// already-parsed leaf, so goal-level parsing can reuse this after
    /// consuming a leading `Variable`/`Number` token itself.
    fn parse_arith_continuation(&mut self, leaf: ArithExpr) -> Result<ArithExpr, EngineError> {
        let mut left = self.parse_arith_term_continuation(leaf)?;
        loop {
            let op = match self.kind() {
                TokenKind::Plus => ArithOp::Add,
                TokenKind::Minus => ArithOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_arith_factor()?;
            let right = self.parse_arith_term_continuation(right)?;
            left = ArithExpr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_arith_term_continuation(&mut self, leaf: ArithExpr) -> Result<ArithExpr, EngineError> {
        let mut left = leaf;
        loop {
            let op = match self.kind() {
                TokenKind::Star => ArithOp::Mul,
                TokenKind::Slash => ArithOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_arith_factor()?;
            left = ArithExpr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_arith_factor(&mut self) -> Result<ArithExpr, EngineError> {
        match self.kind().clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(ArithExpr::Num(n))
            }
            TokenKind::Variable(name) => {
                self.advance();
                Ok(ArithExpr::Var(name))
            }
            TokenKind::LeftParen => {
                self.advance();
                let e = self.parse_arith_expr()?;
                self.expect(TokenKind::RightParen)?;
                Ok(e)
            }
            other => Err(EngineError::Syntax(format!(
                "expected a number, variable, or `(`, found {other:?} on line {}",
                self.line()
            ))),
        }
    }
}

fn goals_to_term(mut goals: Vec<Term>) -> Term {
    if goals.len() == 1 {
        goals.pop().unwrap()
    } else {
        Term::Conjunction(goals)
    }
}
