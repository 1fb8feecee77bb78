use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn loading_a_fixture_and_querying_it_prints_bindings() {
    let mut cmd = Command::cargo_bin("tarski").unwrap();
    cmd.write_stdin("[family].\ngrandparent(tom, X).\n");
    cmd.assert().success().stdout(contains("X = ann"));
}

#[test]
fn an_unsatisfiable_query_prints_false() {
    let mut cmd = Command::cargo_bin("tarski").unwrap();
    cmd.write_stdin("[family].\nparent(ann, tom).\n");
    cmd.assert().success().stdout(contains("false."));
}

#[test]
fn loading_a_missing_module_reports_an_error_instead_of_crashing() {
    let mut cmd = Command::cargo_bin("tarski").unwrap();
    cmd.write_stdin("[no_such_module].\n");
    cmd.assert().success().stdout(contains("error:"));
}

#[test]
fn a_fact_only_query_prints_true_with_no_bindings() {
    let mut cmd = Command::cargo_bin("tarski").unwrap();
    cmd.write_stdin("[family].\nparent(tom, bob).\n");
    cmd.assert().success().stdout(contains("true."));
}
