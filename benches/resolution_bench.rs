// benches/resolution_bench.rs
use std::cell::RefCell;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tarski::database::Database;
use tarski::resolver::execute;
use tarski::subst::unify;
use tarski::syntax::{parse_program, parse_query};
use tarski::term::Term;

/// Builds a database with a recursive `len/2` and a 50-element list fact,
/// the shape of workload the resolution engine spends most of its time on:
/// repeated clause-call activation and backtracking through a conjunction.
fn build_len_database() -> Rc<RefCell<Database>> {
    let db = Rc::new(RefCell::new(Database::new()));
    db.borrow_mut().append(
        parse_program("len([], 0).\nlen([_|T], N) :- len(T, M), N is M + 1.\n").unwrap(),
    );
    db
}

fn list_of(n: usize) -> String {
    let items: Vec<String> = (0..n).map(|i| i.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn benchmark_recursive_resolution(c: &mut Criterion) {
    let db = build_len_database();
    let query = format!("len({}, N)", list_of(50));

    c.bench_function("resolve_len_50", |b| {
        b.iter(|| {
            let goal = parse_query(&query).expect("query should parse");
            let mut solutions = execute(&db, goal);
            let answer = solutions.next().expect("len/2 should succeed");
            black_box(answer.expect("len/2 should not error"));
        })
    });
}

fn benchmark_backtracking(c: &mut Criterion) {
    let db = Rc::new(RefCell::new(Database::new()));
    let facts: String = (0..50).map(|i| format!("p({i}).\n")).collect();
    db.borrow_mut().append(parse_program(&facts).unwrap());

    c.bench_function("backtrack_50_facts", |b| {
        b.iter(|| {
            let goal = parse_query("p(X)").expect("query should parse");
            let count = execute(&db, goal).count();
            black_box(count);
        })
    });
}

fn benchmark_unification(c: &mut Criterion) {
    let a = Term::compound("f", vec![Term::var("X"), Term::Num(1.0), Term::atom("g")]);
    let b = Term::compound("f", vec![Term::Num(42.0), Term::var("Y"), Term::atom("g")]);

    c.bench_function("unify_compound_terms", |b_| {
        b_.iter(|| {
            let result = unify(&a, &b);
            black_box(result);
        })
    });
}

criterion_group!(
    benches,
    benchmark_recursive_resolution,
    benchmark_backtracking,
    benchmark_unification
);
criterion_main!(benches);
