// src/main.rs
//! A minimal REPL wiring `tarski::syntax` to the resolution engine,
//! grounded on `original_source/main.py`'s loop: a `[name].` line loads
//! `tests/name.pl` into the live database; any other line is a query.
//! After each answer, `;` asks for the next one; anything else stops.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use tarski::database::Database;
use tarski::resolver::{execute, project_bindings};
use tarski::syntax::{parse_program, parse_query};
use tarski::{EngineError, Term};

fn main() {
    env_logger::init();
    let db = Rc::new(RefCell::new(Database::new()));
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    prompt(&mut stdout);
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            prompt(&mut stdout);
            continue;
        }

        if let Some(name) = load_directive(trimmed) {
            match load_file(&db, &name) {
                Ok(()) => println!("true."),
                Err(e) => println!("error: {e}"),
            }
            prompt(&mut stdout);
            continue;
        }

        match parse_query(trimmed) {
            Ok(goal) => run_query(&db, goal, &stdin, &mut stdout),
            Err(e) => println!("error: {e}"),
        }
        prompt(&mut stdout);
    }
}

fn prompt(stdout: &mut impl Write) {
    print!("?- ");
    let _ = stdout.flush();
}

/// Recognizes the `[name].` load directive; any other shape is a query.
fn load_directive(line: &str) -> Option<String> {
    let inner = line.strip_prefix('[')?.strip_suffix("].")?;
    let valid = !inner.is_empty() && inner.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then(|| inner.to_string())
}

fn load_file(db: &Rc<RefCell<Database>>, name: &str) -> Result<(), EngineError> {
    let path = format!("tests/{name}.pl");
    let content =
        std::fs::read_to_string(&path).map_err(|_| EngineError::FileNotFound(path.clone()))?;
    let rules = parse_program(&content)?;
    db.borrow_mut().append(rules);
    Ok(())
}

fn run_query(db: &Rc<RefCell<Database>>, goal: Term, stdin: &io::Stdin, stdout: &mut impl Write) {
    let mut solutions = execute(db, goal.clone());
    let mut found_any = false;
    loop {
        match solutions.next() {
            None => {
                if !found_any {
                    println!("false.");
                }
                return;
            }
            Some(Err(e)) => {
                println!("error: {e}");
                return;
            }
            Some(Ok(subst)) => {
                found_any = true;
                print!("{}", db.borrow_mut().stream_read());
                let bindings = project_bindings(&goal, &subst);
                if bindings.is_empty() {
                    println!("true.");
                } else {
                    let rendered: Vec<String> = bindings
                        .iter()
                        .map(|(name, value)| format!("{name} = {value}"))
                        .collect();
                    println!("{}", rendered.join(",\n"));
                }
                let _ = stdout.flush();

                let mut next = String::new();
                if stdin.lock().read_line(&mut next).is_err() || next.trim() != ";" {
                    return;
                }
            }
        }
    }
}
