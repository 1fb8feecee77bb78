use std::cell::RefCell;
use std::rc::Rc;

use tarski::database::Database;
use tarski::resolver::execute;
use tarski::syntax::{parse_program, parse_query};
use tarski::Term;

fn fresh_db(program: &str) -> Rc<RefCell<Database>> {
    let db = Rc::new(RefCell::new(Database::new()));
    db.borrow_mut().append(parse_program(program).unwrap());
    db
}

fn answers(db: &Rc<RefCell<Database>>, query: &str) -> Vec<Vec<(String, Term)>> {
    let goal = parse_query(query).unwrap();
    execute(db, goal.clone())
        .map(|r| tarski::project_bindings(&goal, &r.expect("should succeed")))
        .collect()
}

#[test]
fn scenario_1_facts_only() {
    let db = fresh_db("likes(a, b).\nlikes(b, c).\n");
    let got = answers(&db, "likes(X, Y)");
    assert_eq!(
        got,
        vec![
            vec![
                ("X".to_string(), Term::atom("a")),
                ("Y".to_string(), Term::atom("b"))
            ],
            vec![
                ("X".to_string(), Term::atom("b")),
                ("Y".to_string(), Term::atom("c"))
            ],
        ]
    );
}

#[test]
fn scenario_2_recursion_with_list() {
    let db = fresh_db("len([], 0).\nlen([_|T], N) :- len(T, M), N is M + 1.\n");
    let got = answers(&db, "len([a, b, c], N)");
    assert_eq!(got, vec![vec![("N".to_string(), Term::Num(3.0))]]);
}

#[test]
fn scenario_3_cut() {
    let db = fresh_db("max(X, Y, X) :- X >= Y, !.\nmax(_, Y, Y).\n");

    let got = answers(&db, "max(3, 5, Z)");
    assert_eq!(got, vec![vec![("Z".to_string(), Term::Num(5.0))]]);

    let got = answers(&db, "max(7, 2, Z)");
    assert_eq!(
        got,
        vec![vec![("Z".to_string(), Term::Num(7.0))]],
        "cut must block the second max/3 clause from ever being tried"
    );
}

#[test]
fn scenario_4_arithmetic() {
    let db = fresh_db("");
    let got = answers(&db, "X is 2 + 3 * 4");
    assert_eq!(got, vec![vec![("X".to_string(), Term::Num(14.0))]]);
}

#[test]
fn scenario_5_side_effects() {
    let db = fresh_db("greet :- write(hello), nl.\n");
    let goal = parse_query("greet").unwrap();
    let mut solutions = execute(&db, goal.clone());
    assert!(solutions.next().unwrap().is_ok());
    assert_eq!(db.borrow_mut().stream_read(), "hello\n");
}

#[test]
fn scenario_6_dynamic() {
    let db = fresh_db("");
    let got = answers(&db, "assertz(f(1)), assertz(f(2)), f(X)");
    assert_eq!(
        got,
        vec![
            vec![("X".to_string(), Term::Num(1.0))],
            vec![("X".to_string(), Term::Num(2.0))],
        ]
    );
}
