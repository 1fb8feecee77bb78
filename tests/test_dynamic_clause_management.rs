use std::cell::RefCell;
use std::rc::Rc;

use tarski::database::Database;
use tarski::resolver::execute;
use tarski::syntax::parse_query;
use tarski::Term;

#[test]
fn assertz_is_visible_to_goals_solved_later_in_the_same_proof() {
    let db = Rc::new(RefCell::new(Database::new()));
    let goal = parse_query("assertz(counter(1)), assertz(counter(2)), counter(X)").unwrap();
    let answers: Vec<_> = execute(&db, goal.clone())
        .map(|r| r.expect("should succeed"))
        .collect();
    let values: Vec<_> = answers
        .iter()
        .map(|s| tarski::project_bindings(&goal, s))
        .map(|b| b[0].1.clone())
        .collect();
    assert_eq!(values, vec![Term::Num(1.0), Term::Num(2.0)]);
}

#[test]
fn asserta_prepends_instead_of_appending() {
    let db = Rc::new(RefCell::new(Database::new()));
    db.borrow_mut()
        .append(tarski::syntax::parse_program("fact(b).\n").unwrap());
    let goal = parse_query("asserta(fact(a)), fact(X)").unwrap();
    let mut solutions = execute(&db, goal.clone());
    let first = solutions.next().unwrap().expect("should succeed");
    let bindings = tarski::project_bindings(&goal, &first);
    assert_eq!(bindings[0].1, Term::atom("a"));
}

#[test]
fn retract_removes_the_first_clause_whose_head_unifies() {
    let db = Rc::new(RefCell::new(Database::new()));
    db.borrow_mut().append(
        tarski::syntax::parse_program("fact(a).\nfact(b).\nfact(c).\n").unwrap(),
    );
    let goal = parse_query("retract(fact(b))").unwrap();
    let mut solutions = execute(&db, goal);
    assert!(solutions.next().unwrap().is_ok());
    assert!(solutions.next().is_none());

    let remaining: Vec<_> = execute(&db, parse_query("fact(X)").unwrap())
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(remaining.len(), 2, "only `fact(b)` should have been removed");
}

#[test]
fn retract_fails_when_no_clause_head_unifies() {
    let db = Rc::new(RefCell::new(Database::new()));
    db.borrow_mut()
        .append(tarski::syntax::parse_program("fact(a).\n").unwrap());
    let goal = parse_query("retract(fact(z))").unwrap();
    let mut solutions = execute(&db, goal);
    assert!(solutions.next().is_none());
}
