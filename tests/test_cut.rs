use std::cell::RefCell;
use std::rc::Rc;

use tarski::database::Database;
use tarski::resolver::execute;
use tarski::syntax::{parse_program, parse_query};

const MAX: &str = "
max(X, Y, X) :- X >= Y, !.
max(X, Y, Y) :- X < Y.
";

#[test]
fn cut_commits_to_the_first_matching_clause() {
    let db = Rc::new(RefCell::new(Database::new()));
    db.borrow_mut().append(parse_program(MAX).unwrap());

    let goal = parse_query("max(3, 5, Z)").unwrap();
    let mut solutions = execute(&db, goal.clone());
    let subst = solutions.next().unwrap().expect("should succeed");
    let bindings = tarski::project_bindings(&goal, &subst);
    assert_eq!(bindings, vec![("Z".to_string(), tarski::Term::Num(5.0))]);

    assert!(
        solutions.next().is_none(),
        "cut should prevent the second max/3 clause from being tried"
    );
}

#[test]
fn cut_blocks_backtracking_into_goals_at_or_before_it() {
    let db = Rc::new(RefCell::new(Database::new()));
    db.borrow_mut().append(
        parse_program("p(1).\np(2).\np(3).\nq(X) :- p(X), !.\n").unwrap(),
    );
    let goal = parse_query("q(X)").unwrap();
    let answers: Vec<_> = execute(&db, goal).collect();
    assert_eq!(answers.len(), 1, "cut should allow only the first p/1 solution");
}

#[test]
fn backtracking_after_the_cut_still_explores_later_goals() {
    let db = Rc::new(RefCell::new(Database::new()));
    db.borrow_mut().append(
        parse_program("p(1).\np(2).\nq(X, Y) :- !, p(X), p(Y).\n").unwrap(),
    );
    let goal = parse_query("q(X, Y)").unwrap();
    let answers: Vec<_> = execute(&db, goal).collect();
    assert_eq!(
        answers.len(),
        4,
        "cut fires before p(X)/p(Y), so both should still backtrack freely"
    );
}
