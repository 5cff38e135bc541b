use std::io::Cursor;

use f2cnf::{
    clause,
    f2::{F2Formula, Options, OutputMode},
    instances::{Cnf, QuantInstance},
    ipasir_lit,
};

fn data(name: &str) -> QuantInstance {
    let manifest = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    QuantInstance::from_dimacs_path(format!("{manifest}/data/{name}")).unwrap()
}

fn parse(data: &str) -> QuantInstance {
    QuantInstance::from_dimacs(Cursor::new(data)).unwrap()
}

fn derived_only() -> Options {
    Options {
        include_original: false,
    }
}

fn eval(cnf: &Cnf, assign: &[bool]) -> bool {
    cnf.iter()
        .all(|cl| cl.iter().any(|l| assign[l.vidx()] == l.is_pos()))
}

/// All assignments to `n` variables, with the variables listed in `fixed`
/// set to the given values
fn assignments(n: usize, fixed: &[bool]) -> impl Iterator<Item = Vec<bool>> + '_ {
    let n_free = n - fixed.len();
    (0..1_u64 << n_free).map(move |bits| {
        let mut assign = fixed.to_vec();
        assign.extend((0..n_free).map(|i| bits >> i & 1 == 1));
        assign
    })
}

/// Checks the F2 formula of an instance with projection variables `1..=n_proj`
/// and all remaining variables dependent against model enumeration of the
/// instance
fn check_semantics(inst: &QuantInstance, n_proj: usize) {
    let n_orig = inst.n_vars() as usize;
    let full = F2Formula::create(inst, Options::default());
    let derived = F2Formula::create(inst, derived_only());
    let n_f2 = full.n_vars() as usize;
    for x in assignments(n_proj, &[]) {
        let n_witnesses = assignments(n_orig, &x)
            .filter(|a| eval(inst.cnf(), a))
            .count();
        let full_sat = assignments(n_f2, &x).any(|a| eval(full.cnf(), &a));
        let derived_sat = assignments(n_f2, &x).any(|a| eval(derived.cnf(), &a));
        assert_eq!(full_sat, n_witnesses >= 2, "projection assignment {x:?}");
        // without the original clauses, the unprimed copy is unconstrained
        assert_eq!(derived_sat, n_witnesses >= 1, "projection assignment {x:?}");
    }
}

#[test]
fn scenario() {
    let f2 = F2Formula::create(&data("scenario.qdimacs"), Options::default());
    assert_eq!(f2.n_vars(), 7);
    let expected: Cnf = [
        clause![ipasir_lit![1], ipasir_lit![-2], ipasir_lit![3]],
        clause![ipasir_lit![1], ipasir_lit![-4], ipasir_lit![5]],
        clause![ipasir_lit![2], ipasir_lit![4], ipasir_lit![-6]],
        clause![ipasir_lit![-2], ipasir_lit![-4], ipasir_lit![-6]],
        clause![ipasir_lit![3], ipasir_lit![5], ipasir_lit![-7]],
        clause![ipasir_lit![-3], ipasir_lit![-5], ipasir_lit![-7]],
        clause![ipasir_lit![6], ipasir_lit![7]],
    ]
    .into_iter()
    .collect();
    assert_eq!(f2.cnf(), &expected);
}

#[test]
fn scenario_written() {
    let f2 = F2Formula::create(&data("scenario.qdimacs"), Options::default());
    let mut cursor = Cursor::new(vec![]);
    f2.write_dimacs(&mut cursor, OutputMode::Ind).unwrap();
    let written = String::from_utf8(cursor.into_inner()).unwrap();
    assert_eq!(
        written,
        "p cnf 7 7\nc ind 1 0\n1 -2 3 0\n1 -4 5 0\n2 4 -6 0\n-2 -4 -6 0\n3 5 -7 0\n-3 -5 -7 0\n6 7 0\n"
    );
}

#[test]
fn include_original_choice() {
    let inst = data("scenario.qdimacs");
    let full = F2Formula::create(&inst, Options::default());
    let derived = F2Formula::create(&inst, derived_only());
    assert_eq!(full.cnf().len(), derived.cnf().len() + inst.cnf().len());
    assert_eq!(full.cnf()[0], inst.cnf()[0]);
    assert!(derived.cnf().iter().all(|cl| cl != &inst.cnf()[0]));
    assert_eq!(full.n_vars(), derived.n_vars());
}

#[test]
fn projection_clause_not_duplicated() {
    let inst = parse("p cnf 2 2\na 1 0\ne 2 0\n1 -1 0\n-1 2 0\n");
    let f2 = F2Formula::create(&inst, derived_only());
    assert_eq!(f2.stats().n_duplicated, 1);
    assert_eq!(f2.cnf()[0], clause![ipasir_lit![-1], ipasir_lit![3]]);
    assert!(f2
        .cnf()
        .iter()
        .all(|cl| cl != &clause![ipasir_lit![1], ipasir_lit![-1]]));
}

#[test]
fn empty_dependent_set() {
    let inst = parse("p cnf 2 2\na 1 0\n1 2 0\n-1 0\n");
    let f2 = F2Formula::create(&inst, derived_only());
    // variable 2 is anomalous and maps to itself
    assert_eq!(f2.stats().n_anomalous, 1);
    assert_eq!(f2.stats().n_primed, 0);
    assert_eq!(f2.n_vars(), 2);
    assert_eq!(
        f2.cnf().iter().collect::<Vec<_>>(),
        vec![&clause![ipasir_lit![1], ipasir_lit![2]], &clause![]]
    );
}

#[test]
fn count_accounting() {
    for data in [
        "p cnf 3 1\na 1 0\ne 2 3 0\n1 -2 3 0\n",
        "p cnf 5 3\na 1 0\ne 2 4 0\n1 2 0\n-3 5 0\n1 -1 0\n",
        "p cnf 4 2\na 1 2 0\ne 2 3 0\n-1 2 0\n3 4 -2 0\n",
        "p cnf 6 0\ne 1 2 3 4 5 6 0\n",
    ] {
        let inst = parse(data);
        let f2 = F2Formula::create(&inst, Options::default());
        let stats = f2.stats();
        assert_eq!(
            f2.n_vars() as usize,
            inst.n_vars() as usize + 2 * stats.n_primed,
            "{data}"
        );
        assert_eq!(
            f2.cnf().len(),
            stats.n_original + stats.n_duplicated + 2 * stats.n_primed + 1,
            "{data}"
        );
        assert_eq!(stats.n_disagreement, 2 * stats.n_primed, "{data}");
    }
}

#[test]
fn overlapping_declaration() {
    let inst = parse("p cnf 4 2\na 1 2 0\ne 2 3 0\n-1 2 0\n3 4 -2 0\n");
    let f2 = F2Formula::create(&inst, derived_only());
    let stats = f2.stats();
    assert_eq!(stats.n_overlapping, 1);
    assert_eq!(stats.n_anomalous, 1);
    assert_eq!(stats.n_primed, 1);
    // `-1 2` is over the projection once 2 counts as projection
    assert_eq!(stats.n_duplicated, 1);
    assert_eq!(
        f2.cnf()[0],
        clause![ipasir_lit![5], ipasir_lit![4], ipasir_lit![-2]]
    );
}

#[test]
fn support_in_declaration_order() {
    let inst = parse("p cnf 4 1\na 3 1 0\ne 2 0\na 4 0\n1 2 0\n");
    let f2 = F2Formula::create(&inst, Options::default());
    let mut cursor = Cursor::new(vec![]);
    f2.write_dimacs(&mut cursor, OutputMode::Show).unwrap();
    let written = String::from_utf8(cursor.into_inner()).unwrap();
    assert_eq!(written.lines().nth(1), Some("c p show 3 1 4 0"));
}

#[test]
fn functional_dependency_is_unique() {
    let inst = data("functional.qdimacs");
    check_semantics(&inst, 2);
}

#[test]
fn relational_dependency() {
    let inst = data("relational.qdimacs");
    check_semantics(&inst, 2);
}

#[test]
fn output_parses_back() {
    let f2 = F2Formula::create(&data("relational.qdimacs"), Options::default());
    let mut cursor = Cursor::new(vec![]);
    f2.write_dimacs(&mut cursor, OutputMode::Ind).unwrap();
    cursor.set_position(0);
    let reparsed = QuantInstance::from_dimacs(cursor).unwrap();
    assert_eq!(reparsed.n_vars(), f2.n_vars());
    assert_eq!(reparsed.cnf(), f2.cnf());
}
