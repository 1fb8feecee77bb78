use quickcheck::quickcheck;
use tarski::{unify, Substitution, Term};

fn ground_term(seed: i32, depth: u8) -> Term {
    if depth == 0 {
        return Term::Num((seed % 7) as f64);
    }
    match seed.rem_euclid(3) {
        0 => Term::Num((seed % 11) as f64),
        1 => Term::atom(if seed % 2 == 0 { "a" } else { "b" }),
        _ => Term::compound(
            "f",
            vec![
                ground_term(seed.wrapping_mul(3).wrapping_add(1), depth - 1),
                ground_term(seed.wrapping_mul(5).wrapping_add(7), depth - 1),
            ],
        ),
    }
}

quickcheck! {
    fn unification_is_symmetric(a_seed: i32, b_seed: i32) -> bool {
        let a = ground_term(a_seed, 2);
        let b = ground_term(b_seed, 2);
        unify(&a, &b).is_some() == unify(&b, &a).is_some()
    }
}

quickcheck! {
    fn a_ground_term_always_unifies_with_itself(seed: i32) -> bool {
        let t = ground_term(seed, 2);
        unify(&t, &t) == Some(Substitution::empty())
    }
}

quickcheck! {
    fn substitution_on_a_ground_term_is_a_no_op(seed: i32, var_value: i32) -> bool {
        let t = ground_term(seed, 2);
        let sigma = Substitution::singleton("Unrelated".to_string(), Term::Num(var_value as f64));
        t.substitute(&sigma) == t
    }
}

quickcheck! {
    fn rename_preserves_ground_terms(seed: i32, suffix: u64) -> bool {
        let t = ground_term(seed, 2);
        t.rename(suffix) == t
    }
}

quickcheck! {
    fn rename_is_injective_on_variable_names(name_seed: u8, suffix: u64) -> bool {
        let name = format!("V{name_seed}");
        let renamed = Term::var(&name).rename(suffix);
        renamed == Term::var(format!("{name}#{suffix}"))
    }
}
