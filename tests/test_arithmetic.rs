use std::cell::RefCell;
use std::rc::Rc;

use tarski::database::Database;
use tarski::resolver::execute;
use tarski::syntax::parse_query;
use tarski::EngineError;

fn solve_all(src: &str) -> Result<Vec<String>, EngineError> {
    let db = Rc::new(RefCell::new(Database::new()));
    let goal = parse_query(src)?;
    let mut out = Vec::new();
    for result in execute(&db, goal.clone()) {
        let subst = result?;
        out.push(tarski::project_bindings(&goal, &subst).iter().map(|(n, v)| format!("{n}={v}")).collect::<Vec<_>>().join(","));
    }
    Ok(out)
}

#[test]
fn is_binds_an_unbound_variable_to_the_evaluated_result() {
    let answers = solve_all("X is 3 + 4 * 2").expect("should evaluate");
    assert_eq!(answers, vec!["X=11".to_string()]);
}

#[test]
fn is_succeeds_when_already_bound_to_the_same_number() {
    let answers = solve_all("X is (10 - 2) / 4, X is 2").expect("should evaluate");
    assert_eq!(answers.len(), 1);
}

#[test]
fn is_fails_when_already_bound_to_a_different_number() {
    let answers = solve_all("X is 1 + 1, X is 3").expect("should evaluate");
    assert!(answers.is_empty());
}

#[test]
fn is_errors_on_an_unbound_arithmetic_variable() {
    let err = solve_all("X is Y + 1").unwrap_err();
    assert!(matches!(err, EngineError::UnboundArithmeticVariable(_)));
}

#[test]
fn comparisons_evaluate_both_sides_before_comparing() {
    let answers = solve_all("3 + 1 == 2 * 2").expect("should evaluate");
    assert_eq!(answers.len(), 1);
}

#[test]
fn less_than_succeeds_and_fails_correctly() {
    let ok = solve_all("1 < 2").expect("ok");
    assert_eq!(ok.len(), 1);
    let no = solve_all("2 < 1").expect("ok");
    assert!(no.is_empty());
}
